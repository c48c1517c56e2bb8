//! Domain entities - core business objects

mod favorite;
mod property;
mod session;
mod user;

pub use favorite::Favorite;
pub use property::{ApprovalStatus, Property, PropertyStatus, PropertyType};
pub use session::{Session, UserType, SESSION_TTL_DAYS};
pub use user::{Role, User};
