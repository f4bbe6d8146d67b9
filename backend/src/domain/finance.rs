//! Finance ledger: revenue, expenses, and the running balance.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money in.
    Revenue,
    /// Money out.
    Expense,
}

/// A single ledger movement. Amounts are positive integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Direction of the movement.
    pub kind: TransactionKind,
    /// Amount moved, in cents; always positive.
    pub amount_cents: i64,
    /// What the movement was for.
    pub description: String,
}

/// Validation failure for a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionValidationError;

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transaction amount must be positive")
    }
}

impl std::error::Error for TransactionValidationError {}

impl Transaction {
    /// Validate and build a transaction.
    pub fn new(
        kind: TransactionKind,
        amount_cents: i64,
        description: impl Into<String>,
    ) -> Result<Self, TransactionValidationError> {
        if amount_cents <= 0 {
            return Err(TransactionValidationError);
        }
        Ok(Self {
            kind,
            amount_cents,
            description: description.into(),
        })
    }
}

/// Aggregated salon finances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceLedger {
    /// Total revenue recorded, in cents.
    pub revenue_cents: i64,
    /// Total expenses recorded, in cents.
    pub expenses_cents: i64,
    /// Running balance (revenue minus expenses), in cents.
    pub balance_cents: i64,
}

impl FinanceLedger {
    /// Apply a transaction to the ledger.
    pub fn apply(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Revenue => {
                self.revenue_cents += transaction.amount_cents;
                self.balance_cents += transaction.amount_cents;
            }
            TransactionKind::Expense => {
                self.expenses_cents += transaction.amount_cents;
                self.balance_cents -= transaction.amount_cents;
            }
        }
    }
}

/// Render cents as a `$D.CC` dollar string for human-facing copy.
///
/// # Examples
/// ```
/// use backend::domain::format_usd;
///
/// assert_eq!(format_usd(6550), "$65.50");
/// assert_eq!(format_usd(5), "$0.05");
/// ```
pub fn format_usd(cents: i64) -> String {
    let dollars = cents.div_euclid(100);
    let remainder = cents.rem_euclid(100);
    format!("${dollars}.{remainder:02}")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[test]
    fn revenue_and_expense_move_the_balance() {
        let mut ledger = FinanceLedger::default();
        let income =
            Transaction::new(TransactionKind::Revenue, 12_000, "gel set").expect("valid amount");
        let rent =
            Transaction::new(TransactionKind::Expense, 4_500, "supplies").expect("valid amount");

        ledger.apply(&income);
        ledger.apply(&rent);

        assert_eq!(ledger.revenue_cents, 12_000);
        assert_eq!(ledger.expenses_cents, 4_500);
        assert_eq!(ledger.balance_cents, 7_500);
    }

    #[test]
    fn balance_may_go_negative() {
        let mut ledger = FinanceLedger::default();
        let rent =
            Transaction::new(TransactionKind::Expense, 10_000, "rent").expect("valid amount");
        ledger.apply(&rent);
        assert_eq!(ledger.balance_cents, -10_000);
    }

    #[rstest]
    #[case(0)]
    #[case(-250)]
    fn non_positive_amounts_are_rejected(#[case] amount: i64) {
        assert!(Transaction::new(TransactionKind::Revenue, amount, "x").is_err());
    }

    #[rstest]
    #[case(6550, "$65.50")]
    #[case(100, "$1.00")]
    #[case(5, "$0.05")]
    #[case(0, "$0.00")]
    fn dollars_render_with_two_decimals(#[case] cents: i64, #[case] expected: &str) {
        assert_eq!(format_usd(cents), expected);
    }
}
