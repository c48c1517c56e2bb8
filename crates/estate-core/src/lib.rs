//! # estate-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! notification port. This crate has zero dependencies on infrastructure
//! (database, web framework, mail transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ApprovalStatus, Favorite, Property, PropertyStatus, PropertyType, Role, Session, User,
    UserType, SESSION_TTL_DAYS,
};
pub use error::DomainError;
pub use traits::{
    FavoriteRepository, Notification, Notifier, PropertyFilter, PropertyPage, PropertyQuery,
    PropertyRepository, PropertySort, RepoResult, SessionRepository, SortDirection,
    UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
