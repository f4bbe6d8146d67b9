//! Port for minting verification codes.
//!
//! Randomness is injected so the login flow is deterministic under test.

use crate::domain::auth::VerificationCode;

/// Port for producing a fresh six-digit verification code.
#[cfg_attr(test, mockall::automock)]
pub trait CodeIssuer: Send + Sync {
    /// Mint a new code.
    fn issue(&self) -> VerificationCode;
}

/// Fixture implementation that always issues `000000`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCodeIssuer;

impl CodeIssuer for FixtureCodeIssuer {
    fn issue(&self) -> VerificationCode {
        VerificationCode::new("000000").expect("fixture code is valid")
    }
}
