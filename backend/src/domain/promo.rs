//! Promo codes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A discount code the owner can distribute to customers.
///
/// A code without an expiry date is permanent. `used` counts how many
/// recipients the code has been distributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    /// Unique promo identifier.
    pub id: Uuid,
    /// The code customers type at checkout.
    pub code: String,
    /// Discount in whole percent, `1..=100`.
    pub discount_percent: u8,
    /// Last day the code is honoured; absent means permanent.
    pub expires_on: Option<NaiveDate>,
    /// How many recipients the code has been sent to.
    pub used: u32,
    /// Whether the owner has the code switched on.
    pub is_active: bool,
    /// Instant the code was created.
    pub created_at: DateTime<Utc>,
}

/// Validation failure for a promo draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoValidationError {
    /// Code string was missing or blank.
    EmptyCode,
    /// Discount was zero or above one hundred percent.
    DiscountOutOfRange(u8),
}

impl fmt::Display for PromoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "promo code must not be empty"),
            Self::DiscountOutOfRange(got) => {
                write!(f, "discount must be between 1 and 100 percent, got {got}")
            }
        }
    }
}

impl std::error::Error for PromoValidationError {}

/// Unvalidated promo fields as supplied by an inbound adapter.
#[derive(Debug, Clone)]
pub struct PromoDraft {
    /// The code string as typed.
    pub code: String,
    /// Discount in whole percent.
    pub discount_percent: u8,
    /// Optional last day of validity.
    pub expires_on: Option<NaiveDate>,
}

impl PromoCode {
    /// Validate a draft into an active promo code.
    ///
    /// The code string is trimmed and upper-cased so lookups are
    /// case-insensitive.
    pub fn try_from_draft(
        draft: PromoDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PromoValidationError> {
        let code = draft.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(PromoValidationError::EmptyCode);
        }
        if draft.discount_percent == 0 || draft.discount_percent > 100 {
            return Err(PromoValidationError::DiscountOutOfRange(
                draft.discount_percent,
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            code,
            discount_percent: draft.discount_percent,
            expires_on: draft.expires_on,
            used: 0,
            is_active: true,
            created_at,
        })
    }

    /// Whether the code can be honoured on `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.expires_on.is_none_or(|last| date <= last)
    }

    /// Record a distribution to `recipients` customers.
    pub fn record_distribution(&mut self, recipients: u32) {
        self.used = self.used.saturating_add(recipients);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn draft(code: &str, percent: u8) -> PromoDraft {
        PromoDraft {
            code: code.to_owned(),
            discount_percent: percent,
            expires_on: None,
        }
    }

    #[test]
    fn codes_are_upper_cased() {
        let promo = PromoCode::try_from_draft(draft("spring20", 20), Utc::now()).expect("valid");
        assert_eq!(promo.code, "SPRING20");
        assert!(promo.is_active);
        assert_eq!(promo.used, 0);
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn out_of_range_discounts_are_rejected(#[case] percent: u8) {
        let err = PromoCode::try_from_draft(draft("X", percent), Utc::now())
            .expect_err("invalid discount");
        assert_eq!(err, PromoValidationError::DiscountOutOfRange(percent));
    }

    #[test]
    fn permanent_codes_never_expire() {
        let promo = PromoCode::try_from_draft(draft("FOREVER", 10), Utc::now()).expect("valid");
        let far_future = NaiveDate::from_ymd_opt(2099, 1, 1).expect("valid date");
        assert!(promo.is_valid_on(far_future));
    }

    #[test]
    fn dated_codes_expire_after_their_last_day() {
        let mut promo = PromoCode::try_from_draft(draft("JUNE", 15), Utc::now()).expect("valid");
        let last_day = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        promo.expires_on = Some(last_day);
        assert!(promo.is_valid_on(last_day));
        assert!(!promo.is_valid_on(last_day + chrono::TimeDelta::days(1)));
    }

    #[test]
    fn inactive_codes_are_invalid() {
        let mut promo = PromoCode::try_from_draft(draft("OFF", 15), Utc::now()).expect("valid");
        promo.is_active = false;
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        assert!(!promo.is_valid_on(today));
    }

    #[test]
    fn distribution_accumulates_usage() {
        let mut promo = PromoCode::try_from_draft(draft("VIP", 25), Utc::now()).expect("valid");
        promo.record_distribution(3);
        promo.record_distribution(2);
        assert_eq!(promo.used, 5);
    }
}
