//! Phone number primitives.
//!
//! Phone numbers are the account identity for the login flow and the
//! delivery address for verification codes, so inbound payloads are
//! normalised once at the boundary and handled as a validated type from
//! then on.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Domain error returned when a phone number fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneValidationError {
    /// The input contained no digits at all.
    Empty,
    /// The input did not normalise to exactly ten digits.
    WrongLength(usize),
    /// The input contained characters other than digits and formatting.
    InvalidCharacter(char),
}

impl fmt::Display for PhoneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "phone number must not be empty"),
            Self::WrongLength(len) => {
                write!(f, "phone number must contain exactly 10 digits, got {len}")
            }
            Self::InvalidCharacter(ch) => {
                write!(f, "phone number contains invalid character {ch:?}")
            }
        }
    }
}

impl std::error::Error for PhoneValidationError {}

/// Normalised ten-digit phone number.
///
/// ## Invariants
/// - The inner string contains exactly ten ASCII digits.
/// - Formatting characters (`(`, `)`, `-`, `.`, spaces) and a leading
///   `+1`/`1` country prefix are stripped during construction.
///
/// # Examples
/// ```
/// use backend::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("(317) 432-3276").unwrap();
/// assert_eq!(phone.as_str(), "3174323276");
/// assert_eq!(phone.masked(), "(317) 432-****");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "3174323276")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalise and validate a raw phone number string.
    pub fn new(raw: &str) -> Result<Self, PhoneValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhoneValidationError::Empty);
        }

        let mut digits = String::with_capacity(10);
        for ch in trimmed.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '(' | ')' | '-' | '.' | '+' => {}
                other => return Err(PhoneValidationError::InvalidCharacter(other)),
            }
        }

        // Tolerate a US country prefix the way callers type it.
        if digits.len() == 11 && digits.starts_with('1') {
            digits.remove(0);
        }

        if digits.len() != 10 {
            return Err(PhoneValidationError::WrongLength(digits.len()));
        }

        Ok(Self(digits))
    }

    /// The normalised ten-digit form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Display form with the line number hidden, e.g. `(317) 432-****`.
    pub fn masked(&self) -> String {
        let mut chars = self.0.chars();
        let area: String = chars.by_ref().take(3).collect();
        let prefix: String = chars.by_ref().take(3).collect();
        format!("({area}) {prefix}-****")
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3174323276", "3174323276")]
    #[case("(317) 432-3276", "3174323276")]
    #[case("317-432-3276", "3174323276")]
    #[case("+1 317 432 3276", "3174323276")]
    #[case("1.317.432.3276", "3174323276")]
    fn normalises_common_formats(#[case] raw: &str, #[case] expected: &str) {
        let phone = PhoneNumber::new(raw).expect("valid phone");
        assert_eq!(phone.as_str(), expected);
    }

    #[rstest]
    #[case("", PhoneValidationError::Empty)]
    #[case("   ", PhoneValidationError::Empty)]
    #[case("12345", PhoneValidationError::WrongLength(5))]
    #[case("317432327612", PhoneValidationError::WrongLength(12))]
    #[case("317-432-ABCD", PhoneValidationError::InvalidCharacter('A'))]
    fn rejects_invalid_input(#[case] raw: &str, #[case] expected: PhoneValidationError) {
        let err = PhoneNumber::new(raw).expect_err("invalid phone must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn masks_line_number() {
        let phone = PhoneNumber::new("5555551234").expect("valid phone");
        assert_eq!(phone.masked(), "(555) 555-****");
    }

    #[test]
    fn serialises_as_plain_string() {
        let phone = PhoneNumber::new("3174323276").expect("valid phone");
        let json = serde_json::to_string(&phone).expect("serialise");
        assert_eq!(json, "\"3174323276\"");
        let back: PhoneNumber = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, phone);
    }
}
