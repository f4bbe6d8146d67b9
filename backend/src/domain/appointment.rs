//! Appointment aggregate and payment state.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::phone::{PhoneNumber, PhoneValidationError};
use crate::domain::scheduling::ServiceType;

/// Payment state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing received yet.
    Unpaid,
    /// A deposit or partial amount received.
    Partial,
    /// Paid in full.
    Paid,
}

/// A booked appointment.
///
/// Monetary amounts are integer US cents. Date and time are salon-local wall
/// clock values; `created_at` is the UTC instant the booking was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: Uuid,
    /// Client display name.
    pub client_name: String,
    /// Client email used for payment reminders.
    pub client_email: String,
    /// Client phone number.
    pub client_phone: PhoneNumber,
    /// Calendar day of the appointment.
    pub date: NaiveDate,
    /// Starting time of the appointment.
    #[schema(value_type = String, example = "10:30:00")]
    pub time: NaiveTime,
    /// Booked service.
    pub service_type: ServiceType,
    /// Quoted price in cents.
    pub service_price_cents: i64,
    /// Amount received so far in cents.
    pub amount_paid_cents: i64,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Instant the booking was recorded.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Combined start instant in salon-local wall clock terms.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Outstanding balance in cents, floored at zero.
    pub fn balance_due_cents(&self) -> i64 {
        (self.service_price_cents - self.amount_paid_cents).max(0)
    }
}

/// Validation failure for an appointment draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    /// Client name was missing or blank.
    EmptyClientName,
    /// Client email was missing or blank.
    EmptyClientEmail,
    /// Client phone did not normalise.
    InvalidPhone(PhoneValidationError),
    /// Quoted price was negative.
    NegativePrice,
    /// Amount paid was negative.
    NegativeAmountPaid,
}

impl fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyClientName => write!(f, "client name must not be empty"),
            Self::EmptyClientEmail => write!(f, "client email must not be empty"),
            Self::InvalidPhone(err) => write!(f, "{err}"),
            Self::NegativePrice => write!(f, "service price must not be negative"),
            Self::NegativeAmountPaid => write!(f, "amount paid must not be negative"),
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

/// Unvalidated appointment fields as supplied by an inbound adapter.
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    /// Client display name.
    pub client_name: String,
    /// Client email address.
    pub client_email: String,
    /// Client phone as typed.
    pub client_phone: String,
    /// Calendar day.
    pub date: NaiveDate,
    /// Starting time.
    pub time: NaiveTime,
    /// Requested service.
    pub service_type: ServiceType,
    /// Quoted price in cents.
    pub service_price_cents: i64,
}

impl Appointment {
    /// Validate a draft into a booked appointment.
    pub fn try_from_draft(
        draft: AppointmentDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, AppointmentValidationError> {
        let client_name = draft.client_name.trim().to_owned();
        if client_name.is_empty() {
            return Err(AppointmentValidationError::EmptyClientName);
        }
        let client_email = draft.client_email.trim().to_owned();
        if client_email.is_empty() {
            return Err(AppointmentValidationError::EmptyClientEmail);
        }
        let client_phone = PhoneNumber::new(&draft.client_phone)
            .map_err(AppointmentValidationError::InvalidPhone)?;
        if draft.service_price_cents < 0 {
            return Err(AppointmentValidationError::NegativePrice);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            client_name,
            client_email,
            client_phone,
            date: draft.date,
            time: draft.time,
            service_type: draft.service_type,
            service_price_cents: draft.service_price_cents,
            amount_paid_cents: 0,
            payment_status: PaymentStatus::Unpaid,
            created_at,
        })
    }

    /// Apply a payment update, recomputing the payment status.
    pub fn apply_payment(
        &mut self,
        amount_paid_cents: i64,
    ) -> Result<(), AppointmentValidationError> {
        if amount_paid_cents < 0 {
            return Err(AppointmentValidationError::NegativeAmountPaid);
        }
        self.amount_paid_cents = amount_paid_cents;
        self.payment_status = if amount_paid_cents == 0 {
            PaymentStatus::Unpaid
        } else if amount_paid_cents < self.service_price_cents {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Paid
        };
        Ok(())
    }
}
