//! Authentication primitives for the phone + SMS-code login flow.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::phone::{PhoneNumber, PhoneValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Phone was missing or blank once trimmed.
    EmptyPhone,
    /// Phone did not normalise to a valid number.
    InvalidPhone(PhoneValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhone => write!(f, "phone must not be empty"),
            Self::InvalidPhone(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `phone` is a normalised [`PhoneNumber`].
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("(555) 555-1234", "Test123!").unwrap();
/// assert_eq!(creds.phone().as_str(), "5555551234");
/// assert_eq!(creds.password(), "Test123!");
/// ```
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    phone: PhoneNumber,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw phone/password inputs.
    pub fn try_from_parts(phone: &str, password: &str) -> Result<Self, LoginValidationError> {
        if phone.trim().is_empty() {
            return Err(LoginValidationError::EmptyPhone);
        }
        let phone = PhoneNumber::new(phone).map_err(LoginValidationError::InvalidPhone)?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            phone,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Phone number suitable for directory lookups.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Role of a directory account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// The salon owner; sees the whole dashboard.
    Admin,
    /// A salon customer.
    Customer,
}

/// A login directory entry.
///
/// Passwords are compared verbatim; the directory is seeded in memory and
/// hashing is an explicit non-goal of this system (see DESIGN notes).
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Stable account identifier.
    pub id: String,
    /// Normalised login phone number.
    pub phone: PhoneNumber,
    /// Plain credential matched against login attempts.
    pub password: String,
    /// Display name shown after login.
    pub display_name: String,
    /// Dashboard role.
    pub role: AccountRole,
}

/// Opaque bearer token identifying a login session.
///
/// Format: `<uuid-v4>-<unix-millis>`, matching what browsers already store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh token for a new login session.
    pub fn mint(now: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", Uuid::new_v4(), now.timestamp_millis()))
    }

    /// Wrap a raw token string received from a client.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A six-digit SMS verification code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "428311")]
pub struct VerificationCode(String);

/// Error returned when a verification code has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeValidationError;

impl fmt::Display for CodeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "verification code must be exactly six digits")
    }
}

impl std::error::Error for CodeValidationError {}

impl VerificationCode {
    /// Validate a six-digit code string.
    pub fn new(raw: &str) -> Result<Self, CodeValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(CodeValidationError)
        }
    }

    /// The code digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = CodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<VerificationCode> for String {
    fn from(value: VerificationCode) -> Self {
        value.0
    }
}

/// Server-side state of a login session.
///
/// A session starts unverified when credentials check out, becomes verified
/// once the SMS code is confirmed, and expires independently of the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Phone number the session was issued for.
    pub phone: PhoneNumber,
    /// Instant after which the session is no longer honoured.
    pub expires_at: DateTime<Utc>,
    /// Whether the SMS code has been confirmed.
    pub verified: bool,
    /// When a replacement code was last requested, for cooldown enforcement.
    pub last_resend_at: Option<DateTime<Utc>>,
}

impl LoginSession {
    /// Start an unverified session for `phone` expiring after `ttl`.
    pub fn start(phone: PhoneNumber, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            phone,
            expires_at: now + ttl,
            verified: false,
            last_resend_at: None,
        }
    }

    /// Whether the session has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Promote the session to verified and extend its lifetime.
    pub fn mark_verified(&mut self, now: DateTime<Utc>, extended_ttl: TimeDelta) {
        self.verified = true;
        self.expires_at = now + extended_ttl;
    }

    /// Whether enough time has passed since the last resend.
    pub fn resend_allowed(&self, now: DateTime<Utc>, cooldown: TimeDelta) -> bool {
        match self.last_resend_at {
            Some(last) => now - last >= cooldown,
            None => true,
        }
    }
}

/// A verification code awaiting confirmation for a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// The code that was dispatched over SMS.
    pub code: VerificationCode,
    /// Instant after which the code is rejected.
    pub expires_at: DateTime<Utc>,
    /// Failed confirmation attempts so far.
    pub attempts: u8,
}

impl PendingVerification {
    /// Issue a fresh pending verification expiring after `ttl`.
    pub fn issue(code: VerificationCode, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            code,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Whether the code has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Record a failed attempt and return the updated count.
    pub fn record_failure(&mut self) -> u8 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }
}

/// Timing and limit knobs for the login flow.
///
/// Defaults mirror the salon's production behaviour: a 30-minute window to
/// complete verification, 10-minute codes, 24-hour verified sessions, three
/// confirmation attempts, and a one-minute resend cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Lifetime of an unverified session.
    pub session_ttl: TimeDelta,
    /// Lifetime of a dispatched verification code.
    pub verification_ttl: TimeDelta,
    /// Lifetime granted to a session once verified.
    pub verified_session_ttl: TimeDelta,
    /// Confirmation attempts allowed before the login is voided.
    pub max_verification_attempts: u8,
    /// Minimum gap between resend requests.
    pub resend_cooldown: TimeDelta,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            session_ttl: TimeDelta::minutes(30),
            verification_ttl: TimeDelta::minutes(10),
            verified_session_ttl: TimeDelta::hours(24),
            max_verification_attempts: 3,
            resend_cooldown: TimeDelta::seconds(60),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn phone() -> PhoneNumber {
        PhoneNumber::new("5555551234").expect("fixture phone")
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyPhone)]
    #[case("   ", "pw", LoginValidationError::EmptyPhone)]
    #[case("5555551234", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] phone: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(phone, password).expect_err("invalid inputs fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn bad_phone_shape_is_reported() {
        let err = LoginCredentials::try_from_parts("12345", "pw").expect_err("short phone");
        assert!(matches!(err, LoginValidationError::InvalidPhone(_)));
    }

    #[rstest]
    #[case("000000")]
    #[case("123456")]
    #[case(" 987654 ")]
    fn accepts_six_digit_codes(#[case] raw: &str) {
        let code = VerificationCode::new(raw).expect("valid code");
        assert_eq!(code.as_str().len(), 6);
    }

    #[rstest]
    #[case("12345")]
    #[case("1234567")]
    #[case("12345a")]
    #[case("")]
    fn rejects_malformed_codes(#[case] raw: &str) {
        assert!(VerificationCode::new(raw).is_err());
    }

    #[test]
    fn session_expiry_and_verification() {
        let now = Utc::now();
        let mut session = LoginSession::start(phone(), now, TimeDelta::minutes(30));
        assert!(!session.verified);
        assert!(!session.is_expired(now + TimeDelta::minutes(29)));
        assert!(session.is_expired(now + TimeDelta::minutes(31)));

        session.mark_verified(now, TimeDelta::hours(24));
        assert!(session.verified);
        assert!(!session.is_expired(now + TimeDelta::hours(23)));
        assert!(session.is_expired(now + TimeDelta::hours(25)));
    }

    #[test]
    fn resend_cooldown_gates_repeat_requests() {
        let now = Utc::now();
        let cooldown = TimeDelta::seconds(60);
        let mut session = LoginSession::start(phone(), now, TimeDelta::minutes(30));
        assert!(session.resend_allowed(now, cooldown));

        session.last_resend_at = Some(now);
        assert!(!session.resend_allowed(now + TimeDelta::seconds(59), cooldown));
        assert!(session.resend_allowed(now + TimeDelta::seconds(60), cooldown));
    }

    #[test]
    fn pending_verification_counts_failures() {
        let now = Utc::now();
        let code = VerificationCode::new("123456").expect("valid code");
        let mut pending = PendingVerification::issue(code, now, TimeDelta::minutes(10));
        assert_eq!(pending.record_failure(), 1);
        assert_eq!(pending.record_failure(), 2);
        assert!(pending.is_expired(now + TimeDelta::minutes(11)));
    }

    #[test]
    fn minted_tokens_are_unique() {
        let now = Utc::now();
        assert_ne!(SessionToken::mint(now), SessionToken::mint(now));
    }
}
