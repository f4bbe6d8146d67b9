//! In-memory settings storage.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::billing::PaymentSettings;
use crate::domain::ports::{SettingsRepository, SettingsRepositoryError};
use crate::domain::scheduling::WeeklyHours;

/// Process-local settings store starting from the stock defaults.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    hours: RwLock<WeeklyHours>,
    payments: RwLock<PaymentSettings>,
}

impl InMemorySettingsRepository {
    /// Create a store holding default settings.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> SettingsRepositoryError {
    SettingsRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn working_hours(&self) -> Result<WeeklyHours, SettingsRepositoryError> {
        Ok(*self.hours.read().map_err(|_| poisoned())?)
    }

    async fn set_working_hours(&self, hours: WeeklyHours) -> Result<(), SettingsRepositoryError> {
        *self.hours.write().map_err(|_| poisoned())? = hours;
        Ok(())
    }

    async fn payment_settings(&self) -> Result<PaymentSettings, SettingsRepositoryError> {
        Ok(self.payments.read().map_err(|_| poisoned())?.clone())
    }

    async fn set_payment_settings(
        &self,
        settings: PaymentSettings,
    ) -> Result<(), SettingsRepositoryError> {
        *self.payments.write().map_err(|_| poisoned())? = settings;
        Ok(())
    }
}
