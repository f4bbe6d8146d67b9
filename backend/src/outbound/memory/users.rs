//! In-memory login directory.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::auth::{AccountRole, UserAccount};
use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{UserDirectory, UserDirectoryError};

/// Process-local login directory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    accounts: RwLock<Vec<UserAccount>>,
}

fn poisoned() -> UserDirectoryError {
    UserDirectoryError::storage("lock poisoned")
}

fn seed_phone(raw: &str) -> PhoneNumber {
    PhoneNumber::new(raw).expect("seed phone numbers are valid")
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding `accounts`.
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Directory seeded with the stock owner and demo customer accounts the
    /// dashboard ships with.
    pub fn seeded() -> Self {
        Self::with_accounts(vec![
            UserAccount {
                id: "admin".to_owned(),
                phone: seed_phone("3174323276"),
                password: "Admin123!".to_owned(),
                display_name: "Kirra Admin".to_owned(),
                role: AccountRole::Admin,
            },
            UserAccount {
                id: "customer1".to_owned(),
                phone: seed_phone("5555551234"),
                password: "Test123!".to_owned(),
                display_name: "Test Customer".to_owned(),
                role: AccountRole::Customer,
            },
            UserAccount {
                id: "customer_test".to_owned(),
                phone: seed_phone("1234567890"),
                password: "Test123!".to_owned(),
                display_name: "Fallback Test Customer".to_owned(),
                role: AccountRole::Customer,
            },
        ])
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        Ok(self
            .accounts
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|account| account.phone == *phone)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, UserDirectoryError> {
        Ok(self.accounts.read().map_err(|_| poisoned())?.clone())
    }
}
