//! Notification port - the injected email capability
//!
//! Notification delivery is advisory: callers log failures and never let them
//! fail the primary state mutation.

use async_trait::async_trait;

use crate::error::DomainError;

/// A single outbound notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Outbound notification capability
///
/// Implementations wrap a concrete transport; the domain and services only
/// ever depend on this trait.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), DomainError>;
}
