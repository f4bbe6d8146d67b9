//! Port for dispatching SMS messages.

use async_trait::async_trait;

use crate::domain::phone::PhoneNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by SMS delivery adapters.
    pub enum SmsDeliveryError {
        /// The provider rejected or failed the send.
        Delivery { message: String } =>
            "sms delivery failed: {message}",
    }
}

/// Port for sending a text message to a phone number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// Deliver `body` to `to`.
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), SmsDeliveryError>;
}

/// Fixture implementation that silently accepts every send.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSmsNotifier;

#[async_trait]
impl SmsNotifier for FixtureSmsNotifier {
    async fn send(&self, _to: &PhoneNumber, _body: &str) -> Result<(), SmsDeliveryError> {
        Ok(())
    }
}
