//! Outbound communications log: payment reminders, promo blasts, and ad hoc
//! messages sent to customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::finance::format_usd;

/// Category of a logged communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CommunicationKind {
    /// Balance-due nudge for an appointment.
    PaymentReminder,
    /// Promo code distribution.
    Promo,
    /// Anything else the owner sends.
    General,
}

/// A message the salon sent out, kept for the owner's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    /// Unique record identifier.
    pub id: Uuid,
    /// Category of the message.
    pub kind: CommunicationKind,
    /// Recipient display name, when addressed to one person.
    pub recipient_name: Option<String>,
    /// Recipient email, when addressed to one person.
    pub recipient_email: Option<String>,
    /// How many customers received the message.
    pub recipient_count: u32,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Instant the message went out.
    pub sent_at: DateTime<Utc>,
}

impl Communication {
    /// Record an ad hoc message.
    pub fn general(
        subject: impl Into<String>,
        body: impl Into<String>,
        recipient_count: u32,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: CommunicationKind::General,
            recipient_name: None,
            recipient_email: None,
            recipient_count,
            subject: subject.into(),
            body: body.into(),
            sent_at,
        }
    }

    /// Compose a balance-due reminder for one client.
    pub fn payment_reminder(
        recipient_name: impl Into<String>,
        recipient_email: impl Into<String>,
        appointment_label: &str,
        balance_due_cents: i64,
        sent_at: DateTime<Utc>,
    ) -> Self {
        let recipient_name = recipient_name.into();
        let body = format!(
            "Hi {recipient_name}, this is a friendly reminder that you have a balance of {} \
             for your {appointment_label}. Please submit payment at your earliest convenience.",
            format_usd(balance_due_cents),
        );
        Self {
            id: Uuid::new_v4(),
            kind: CommunicationKind::PaymentReminder,
            recipient_name: Some(recipient_name),
            recipient_email: Some(recipient_email.into()),
            recipient_count: 1,
            subject: "Payment Reminder - Kirra's Nail Studio".to_owned(),
            body,
            sent_at,
        }
    }

    /// Record a promo code blast to `recipient_count` customers.
    pub fn promo_blast(
        code: &str,
        discount_percent: u8,
        message_text: Option<String>,
        recipient_count: u32,
        sent_at: DateTime<Utc>,
    ) -> Self {
        let body = message_text
            .unwrap_or_else(|| format!("Get {discount_percent}% off with code {code}!"));
        Self {
            id: Uuid::new_v4(),
            kind: CommunicationKind::Promo,
            recipient_name: None,
            recipient_email: None,
            recipient_count,
            subject: format!("Promo code {code}"),
            body,
            sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn payment_reminder_spells_out_the_balance() {
        let reminder = Communication::payment_reminder(
            "Dana",
            "dana@example.com",
            "gel appointment on 2025-06-02",
            4_000,
            Utc::now(),
        );
        assert_eq!(reminder.kind, CommunicationKind::PaymentReminder);
        assert!(reminder.body.contains("$40.00"));
        assert!(reminder.body.contains("Dana"));
        assert_eq!(reminder.recipient_count, 1);
    }

    #[test]
    fn promo_blast_defaults_its_message() {
        let blast = Communication::promo_blast("SPRING20", 20, None, 7, Utc::now());
        assert_eq!(blast.body, "Get 20% off with code SPRING20!");
        assert_eq!(blast.recipient_count, 7);
    }

    #[test]
    fn promo_blast_prefers_custom_text() {
        let blast = Communication::promo_blast(
            "VIP",
            25,
            Some("Members only: 25% off with VIP".to_owned()),
            3,
            Utc::now(),
        );
        assert_eq!(blast.body, "Members only: 25% off with VIP");
    }
}
