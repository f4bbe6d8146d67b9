//! Port for the finance ledger.

use async_trait::async_trait;

use crate::domain::finance::{FinanceLedger, Transaction};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger store adapters.
    pub enum FinanceLedgerError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "finance ledger storage failed: {message}",
    }
}

/// Port for reading and mutating the aggregated salon finances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinanceLedgerStore: Send + Sync {
    /// Current ledger totals.
    async fn snapshot(&self) -> Result<FinanceLedger, FinanceLedgerError>;

    /// Apply a transaction and return the updated totals.
    async fn apply(&self, transaction: Transaction) -> Result<FinanceLedger, FinanceLedgerError>;
}

/// Fixture implementation that reports an empty ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFinanceLedgerStore;

#[async_trait]
impl FinanceLedgerStore for FixtureFinanceLedgerStore {
    async fn snapshot(&self) -> Result<FinanceLedger, FinanceLedgerError> {
        Ok(FinanceLedger::default())
    }

    async fn apply(&self, _transaction: Transaction) -> Result<FinanceLedger, FinanceLedgerError> {
        Ok(FinanceLedger::default())
    }
}
