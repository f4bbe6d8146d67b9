//! Port for pending SMS verification codes.

use async_trait::async_trait;

use crate::domain::auth::PendingVerification;
use crate::domain::phone::PhoneNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by verification store adapters.
    pub enum VerificationStoreError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "verification store failed: {message}",
    }
}

/// Port for keeping pending verifications keyed by phone number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Store `pending` under `phone`, replacing any previous code.
    async fn put(
        &self,
        phone: &PhoneNumber,
        pending: PendingVerification,
    ) -> Result<(), VerificationStoreError>;

    /// Fetch the pending verification for `phone`.
    async fn get(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<PendingVerification>, VerificationStoreError>;

    /// Drop the pending verification for `phone`, if any.
    async fn remove(&self, phone: &PhoneNumber) -> Result<(), VerificationStoreError>;
}

/// Fixture implementation for tests that never resolve a code.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVerificationStore;

#[async_trait]
impl VerificationStore for FixtureVerificationStore {
    async fn put(
        &self,
        _phone: &PhoneNumber,
        _pending: PendingVerification,
    ) -> Result<(), VerificationStoreError> {
        Ok(())
    }

    async fn get(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<Option<PendingVerification>, VerificationStoreError> {
        Ok(None)
    }

    async fn remove(&self, _phone: &PhoneNumber) -> Result<(), VerificationStoreError> {
        Ok(())
    }
}
