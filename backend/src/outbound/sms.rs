//! SMS delivery adapter that logs instead of sending.
//!
//! There is no SMS provider wired up; codes are surfaced through the
//! structured log stream so the owner can read them during development,
//! mirroring how the dashboard has always been operated.

use async_trait::async_trait;
use tracing::info;

use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{SmsDeliveryError, SmsNotifier};

/// Notifier that emits each message as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSmsNotifier;

impl LoggingSmsNotifier {
    /// Create the notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SmsNotifier for LoggingSmsNotifier {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsDeliveryError> {
        info!(to = %to.masked(), body, "sms dispatched");
        Ok(())
    }
}
