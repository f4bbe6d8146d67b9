//! In-memory promo code storage.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{PromoRepository, PromoRepositoryError};
use crate::domain::promo::PromoCode;

/// Process-local promo store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPromoRepository {
    rows: RwLock<Vec<PromoCode>>,
}

impl InMemoryPromoRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> PromoRepositoryError {
    PromoRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl PromoRepository for InMemoryPromoRepository {
    async fn insert(&self, promo: PromoCode) -> Result<(), PromoRepositoryError> {
        self.rows.write().map_err(|_| poisoned())?.push(promo);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PromoCode>, PromoRepositoryError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<PromoCode>, PromoRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|promo| promo.id == id)
            .cloned())
    }

    async fn update(&self, promo: PromoCode) -> Result<bool, PromoRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        match rows.iter_mut().find(|row| row.id == promo.id) {
            Some(row) => {
                *row = promo;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, PromoRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}
