//! Service layer - business logic

mod auth;
mod context;
mod error;
mod favorite;
mod notifier;
mod property;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use notifier::LogNotifier;
pub use property::PropertyService;
