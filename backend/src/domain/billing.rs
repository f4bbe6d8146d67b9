//! Payment settings and provider integrations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Connection state for a payment provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationState {
    /// Whether the provider has been linked.
    pub connected: bool,
    /// Provider-side account handle (merchant id, cashtag, or username).
    pub account: String,
}

impl IntegrationState {
    /// Mark the integration connected under `account`.
    pub fn connect(&mut self, account: impl Into<String>) {
        self.connected = true;
        self.account = account.into();
    }
}

/// Linked payment providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntegrations {
    /// Apple Pay merchant configuration.
    pub apple_pay: IntegrationState,
    /// Cash App handle configuration.
    pub cash_app: IntegrationState,
    /// Venmo username configuration.
    pub venmo: IntegrationState,
}

/// Payment behaviour knobs the owner can adjust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettings {
    /// Whether reminders go out automatically.
    pub auto_reminders: bool,
    /// Days between automatic reminders.
    pub reminder_frequency_days: u32,
    /// Days after the appointment before payment is due.
    pub payment_due_days: u32,
    /// Linked providers.
    pub integrations: PaymentIntegrations,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            auto_reminders: false,
            reminder_frequency_days: 7,
            payment_due_days: 7,
            integrations: PaymentIntegrations::default(),
        }
    }
}

/// Partial update for [`PaymentSettings`]; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettingsUpdate {
    /// New auto-reminder flag.
    pub auto_reminders: Option<bool>,
    /// New reminder frequency.
    pub reminder_frequency_days: Option<u32>,
    /// New payment due window.
    pub payment_due_days: Option<u32>,
}

impl PaymentSettings {
    /// Merge a partial update into the settings.
    pub fn merge(&mut self, update: PaymentSettingsUpdate) {
        if let Some(auto) = update.auto_reminders {
            self.auto_reminders = auto;
        }
        if let Some(days) = update.reminder_frequency_days {
            self.reminder_frequency_days = days;
        }
        if let Some(days) = update.payment_due_days {
            self.payment_due_days = days;
        }
    }
}
