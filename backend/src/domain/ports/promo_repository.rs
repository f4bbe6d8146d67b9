//! Port for promo code persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::promo::PromoCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by promo repository adapters.
    pub enum PromoRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "promo storage failed: {message}",
    }
}

/// Port for storing and reading promo codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromoRepository: Send + Sync {
    /// Persist a new promo code.
    async fn insert(&self, promo: PromoCode) -> Result<(), PromoRepositoryError>;

    /// All promo codes, in insertion order.
    async fn list(&self) -> Result<Vec<PromoCode>, PromoRepositoryError>;

    /// Find a promo code by id.
    async fn find(&self, id: Uuid) -> Result<Option<PromoCode>, PromoRepositoryError>;

    /// Replace a stored promo code; returns `false` when the id is unknown.
    async fn update(&self, promo: PromoCode) -> Result<bool, PromoRepositoryError>;

    /// Delete a promo code; returns `false` when the id is unknown.
    async fn remove(&self, id: Uuid) -> Result<bool, PromoRepositoryError>;
}

/// Fixture implementation for tests that never touch promos.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePromoRepository;

#[async_trait]
impl PromoRepository for FixturePromoRepository {
    async fn insert(&self, _promo: PromoCode) -> Result<(), PromoRepositoryError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PromoCode>, PromoRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: Uuid) -> Result<Option<PromoCode>, PromoRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _promo: PromoCode) -> Result<bool, PromoRepositoryError> {
        Ok(false)
    }

    async fn remove(&self, _id: Uuid) -> Result<bool, PromoRepositoryError> {
        Ok(false)
    }
}
