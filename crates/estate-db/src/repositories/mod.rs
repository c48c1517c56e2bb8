//! PostgreSQL repository implementations

mod error;
mod favorite;
mod property;
mod session;
mod user;

pub use favorite::PgFavoriteRepository;
pub use property::PgPropertyRepository;
pub use session::PgSessionRepository;
pub use user::PgUserRepository;
