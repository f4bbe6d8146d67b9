//! Port for customer record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::customer::Customer;

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "customer storage failed: {message}",
    }
}

/// Port for storing and reading customer records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer.
    async fn insert(&self, customer: Customer) -> Result<(), CustomerRepositoryError>;

    /// All customers, in insertion order.
    async fn list(&self) -> Result<Vec<Customer>, CustomerRepositoryError>;

    /// Find a customer by id.
    async fn find(&self, id: Uuid) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Replace a stored customer; returns `false` when the id is unknown.
    async fn update(&self, customer: Customer) -> Result<bool, CustomerRepositoryError>;

    /// Delete a customer; returns `false` when the id is unknown.
    async fn remove(&self, id: Uuid) -> Result<bool, CustomerRepositoryError>;
}

/// Fixture implementation for tests that never touch customers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCustomerRepository;

#[async_trait]
impl CustomerRepository for FixtureCustomerRepository {
    async fn insert(&self, _customer: Customer) -> Result<(), CustomerRepositoryError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: Uuid) -> Result<Option<Customer>, CustomerRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _customer: Customer) -> Result<bool, CustomerRepositoryError> {
        Ok(false)
    }

    async fn remove(&self, _id: Uuid) -> Result<bool, CustomerRepositoryError> {
        Ok(false)
    }
}
