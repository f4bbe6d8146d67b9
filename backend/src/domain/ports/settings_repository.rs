//! Port for owner-adjustable settings.

use async_trait::async_trait;

use crate::domain::billing::PaymentSettings;
use crate::domain::scheduling::WeeklyHours;

use super::define_port_error;

define_port_error! {
    /// Errors raised by settings repository adapters.
    pub enum SettingsRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "settings storage failed: {message}",
    }
}

/// Port for reading and writing salon settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The weekly opening schedule.
    async fn working_hours(&self) -> Result<WeeklyHours, SettingsRepositoryError>;

    /// Replace the weekly opening schedule.
    async fn set_working_hours(&self, hours: WeeklyHours)
    -> Result<(), SettingsRepositoryError>;

    /// Payment behaviour settings.
    async fn payment_settings(&self) -> Result<PaymentSettings, SettingsRepositoryError>;

    /// Replace the payment behaviour settings.
    async fn set_payment_settings(
        &self,
        settings: PaymentSettings,
    ) -> Result<(), SettingsRepositoryError>;
}

/// Fixture implementation that always reports defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSettingsRepository;

#[async_trait]
impl SettingsRepository for FixtureSettingsRepository {
    async fn working_hours(&self) -> Result<WeeklyHours, SettingsRepositoryError> {
        Ok(WeeklyHours::default())
    }

    async fn set_working_hours(
        &self,
        _hours: WeeklyHours,
    ) -> Result<(), SettingsRepositoryError> {
        Ok(())
    }

    async fn payment_settings(&self) -> Result<PaymentSettings, SettingsRepositoryError> {
        Ok(PaymentSettings::default())
    }

    async fn set_payment_settings(
        &self,
        _settings: PaymentSettings,
    ) -> Result<(), SettingsRepositoryError> {
        Ok(())
    }
}
