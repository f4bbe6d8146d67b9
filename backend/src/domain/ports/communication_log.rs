//! Port for the outbound communications log.

use async_trait::async_trait;

use crate::domain::communication::Communication;

use super::define_port_error;

define_port_error! {
    /// Errors raised by communication log adapters.
    pub enum CommunicationLogError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "communication log storage failed: {message}",
    }
}

/// Port for recording and listing sent communications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunicationLog: Send + Sync {
    /// Append a sent communication to the log.
    async fn record(&self, communication: Communication) -> Result<(), CommunicationLogError>;

    /// All logged communications, in send order.
    async fn list(&self) -> Result<Vec<Communication>, CommunicationLogError>;
}

/// Fixture implementation that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommunicationLog;

#[async_trait]
impl CommunicationLog for FixtureCommunicationLog {
    async fn record(&self, _communication: Communication) -> Result<(), CommunicationLogError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Communication>, CommunicationLogError> {
        Ok(Vec::new())
    }
}
