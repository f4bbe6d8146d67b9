//! In-memory communications log.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::communication::Communication;
use crate::domain::ports::{CommunicationLog, CommunicationLogError};

/// Process-local communications log; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCommunicationLog {
    rows: RwLock<Vec<Communication>>,
}

impl InMemoryCommunicationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> CommunicationLogError {
    CommunicationLogError::storage("lock poisoned")
}

#[async_trait]
impl CommunicationLog for InMemoryCommunicationLog {
    async fn record(&self, communication: Communication) -> Result<(), CommunicationLogError> {
        self.rows
            .write()
            .map_err(|_| poisoned())?
            .push(communication);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Communication>, CommunicationLogError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.clone())
    }
}
