//! Customer records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::phone::{PhoneNumber, PhoneValidationError};

/// A salon customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone, when known.
    pub phone: Option<PhoneNumber>,
    /// Free-form notes kept by the owner.
    pub notes: Option<String>,
    /// Instant the record was created.
    pub created_at: DateTime<Utc>,
}

/// Validation failure for a customer draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    /// Name was missing or blank.
    EmptyName,
    /// Email was missing or blank.
    EmptyEmail,
    /// Phone was supplied but did not normalise.
    InvalidPhone(PhoneValidationError),
}

impl fmt::Display for CustomerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "customer name must not be empty"),
            Self::EmptyEmail => write!(f, "customer email must not be empty"),
            Self::InvalidPhone(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CustomerValidationError {}

/// Unvalidated customer fields as supplied by an inbound adapter.
#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone as typed, when supplied.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl Customer {
    /// Validate a draft into a customer record.
    pub fn try_from_draft(
        draft: CustomerDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CustomerValidationError> {
        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }
        let email = draft.email.trim().to_owned();
        if email.is_empty() {
            return Err(CustomerValidationError::EmptyEmail);
        }
        let phone = draft
            .phone
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()
            .map_err(CustomerValidationError::InvalidPhone)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            notes: draft.notes,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn draft_validates_and_normalises_phone() {
        let customer = Customer::try_from_draft(
            CustomerDraft {
                name: "  Maya Chen ".to_owned(),
                email: "maya@example.com".to_owned(),
                phone: Some("(555) 010-2030".to_owned()),
                notes: None,
            },
            Utc::now(),
        )
        .expect("valid draft");
        assert_eq!(customer.name, "Maya Chen");
        assert_eq!(customer.phone.map(|p| p.as_str().to_owned()), Some("5550102030".to_owned()));
    }

    #[test]
    fn blank_phone_is_treated_as_absent() {
        let customer = Customer::try_from_draft(
            CustomerDraft {
                name: "Maya".to_owned(),
                email: "maya@example.com".to_owned(),
                phone: Some("   ".to_owned()),
                notes: None,
            },
            Utc::now(),
        )
        .expect("valid draft");
        assert!(customer.phone.is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Customer::try_from_draft(
            CustomerDraft {
                email: "maya@example.com".to_owned(),
                ..CustomerDraft::default()
            },
            Utc::now(),
        )
        .expect_err("blank name fails");
        assert_eq!(err, CustomerValidationError::EmptyName);
    }
}
