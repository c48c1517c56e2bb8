//! Request extractors

pub mod auth;
pub mod validated;

pub use auth::{OptionalSessionUser, SessionUser};
pub use validated::ValidatedJson;
