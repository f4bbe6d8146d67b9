//! Verification code issuer backed by the thread-local RNG.

use rand::Rng;

use crate::domain::auth::VerificationCode;
use crate::domain::ports::CodeIssuer;

/// Issues uniformly random six-digit codes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeIssuer;

impl RandomCodeIssuer {
    /// Create the issuer.
    pub fn new() -> Self {
        Self
    }
}

impl CodeIssuer for RandomCodeIssuer {
    fn issue(&self) -> VerificationCode {
        let value: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        VerificationCode::new(&value.to_string()).expect("six digit range yields a valid code")
    }
}
