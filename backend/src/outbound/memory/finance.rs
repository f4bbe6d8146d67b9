//! In-memory finance ledger.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::finance::{FinanceLedger, Transaction};
use crate::domain::ports::{FinanceLedgerError, FinanceLedgerStore};

/// Process-local ledger; totals are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryFinanceLedger {
    ledger: RwLock<FinanceLedger>,
}

impl InMemoryFinanceLedger {
    /// Create a zeroed ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> FinanceLedgerError {
    FinanceLedgerError::storage("lock poisoned")
}

#[async_trait]
impl FinanceLedgerStore for InMemoryFinanceLedger {
    async fn snapshot(&self) -> Result<FinanceLedger, FinanceLedgerError> {
        Ok(*self.ledger.read().map_err(|_| poisoned())?)
    }

    async fn apply(&self, transaction: Transaction) -> Result<FinanceLedger, FinanceLedgerError> {
        let mut ledger = self.ledger.write().map_err(|_| poisoned())?;
        ledger.apply(&transaction);
        Ok(*ledger)
    }
}
