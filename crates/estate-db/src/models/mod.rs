//! Database models with SQLx `FromRow` derives

mod favorite;
mod property;
mod session;
mod user;

pub use favorite::FavoriteModel;
pub use property::PropertyModel;
pub use session::SessionModel;
pub use user::UserModel;
