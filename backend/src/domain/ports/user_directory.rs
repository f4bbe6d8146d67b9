//! Port for looking up login accounts.

use async_trait::async_trait;

use crate::domain::auth::UserAccount;
use crate::domain::phone::PhoneNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The backing store could not be read.
        Storage { message: String } =>
            "user directory storage failed: {message}",
    }
}

/// Port for reading the login account directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the account registered under `phone`.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<UserAccount>, UserDirectoryError>;

    /// List every account.
    async fn list(&self) -> Result<Vec<UserAccount>, UserDirectoryError>;
}

/// Fixture implementation for tests that never resolve an account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_phone(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<UserAccount>, UserDirectoryError> {
        Ok(Vec::new())
    }
}
