//! In-memory customer storage.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};

/// Process-local customer store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<Vec<Customer>>,
}

impl InMemoryCustomerRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> CustomerRepositoryError {
    CustomerRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: Customer) -> Result<(), CustomerRepositoryError> {
        self.rows.write().map_err(|_| poisoned())?.push(customer);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Customer>, CustomerRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|customer| customer.id == id)
            .cloned())
    }

    async fn update(&self, customer: Customer) -> Result<bool, CustomerRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|row| row.id == customer.id) {
            Some(row) => {
                *row = customer;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, CustomerRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}
