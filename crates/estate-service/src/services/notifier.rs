//! Logging notifier - the default Notifier implementation
//!
//! Writes every notification to the structured log instead of a mail
//! transport. Deployments wire a real transport behind the same port.

use async_trait::async_trait;
use tracing::info;

use estate_core::{DomainError, Notification, Notifier};

/// Notifier that records deliveries in the application log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "notification dispatched"
        );
        Ok(())
    }
}
