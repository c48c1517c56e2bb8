//! Ports - interfaces the domain requires from infrastructure

mod notifier;
mod repositories;

pub use notifier::{Notification, Notifier};
pub use repositories::{
    FavoriteRepository, PropertyFilter, PropertyPage, PropertyQuery, PropertyRepository,
    PropertySort, RepoResult, SessionRepository, SortDirection, UserRepository,
};
