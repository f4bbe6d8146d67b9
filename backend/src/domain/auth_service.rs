//! Phone + SMS-code login flow orchestration.
//!
//! The service owns the whole session lifecycle: credential checks, code
//! issuance and delivery, verification with attempt limiting, resend
//! cooldown, bearer-token validation, and logout. Time comes from an
//! injected clock so every expiry rule is testable.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::auth::{
    AuthPolicy, LoginCredentials, LoginSession, PendingVerification, SessionToken,
    VerificationCode,
};
use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{
    CodeIssuer, SessionStore, SessionStoreError, SmsDeliveryError, SmsNotifier, UserDirectory,
    UserDirectoryError, VerificationStore, VerificationStoreError,
};

/// Response to a successful credential check: the second factor is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginChallenge {
    /// Token the client must echo while completing verification.
    pub session_token: SessionToken,
    /// Masked phone the code was sent to, for display.
    pub masked_phone: String,
}

/// Response to a successful code verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedLogin {
    /// Bearer token for subsequent requests (the original session token).
    pub auth_token: SessionToken,
    /// Masked phone for display.
    pub masked_phone: String,
    /// Display name of the account, when the directory still has it.
    pub display_name: Option<String>,
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    Error::internal(format!("user directory unavailable: {error}"))
}

fn map_session_error(error: SessionStoreError) -> Error {
    Error::internal(format!("session store unavailable: {error}"))
}

fn map_verification_error(error: VerificationStoreError) -> Error {
    Error::internal(format!("verification store unavailable: {error}"))
}

fn map_sms_error(error: SmsDeliveryError) -> Error {
    Error::internal(format!("verification code could not be sent: {error}"))
}

/// Login flow service wiring the auth ports together.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    sessions: Arc<dyn SessionStore>,
    verifications: Arc<dyn VerificationStore>,
    notifier: Arc<dyn SmsNotifier>,
    codes: Arc<dyn CodeIssuer>,
    clock: Arc<dyn Clock>,
    policy: AuthPolicy,
}

impl AuthService {
    /// Build the service from its ports, clock, and policy.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        sessions: Arc<dyn SessionStore>,
        verifications: Arc<dyn VerificationStore>,
        notifier: Arc<dyn SmsNotifier>,
        codes: Arc<dyn CodeIssuer>,
        clock: Arc<dyn Clock>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            directory,
            sessions,
            verifications,
            notifier,
            codes,
            clock,
            policy,
        }
    }

    /// Check credentials and dispatch a verification code.
    ///
    /// # Errors
    /// - [`Error::unauthorized`] when the phone is unknown or the password
    ///   does not match. The message is identical in both cases so the
    ///   endpoint does not confirm which phones have accounts.
    /// - [`Error::internal`] when a port fails.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginChallenge, Error> {
        let phone = credentials.phone();
        let account = self
            .directory
            .find_by_phone(phone)
            .await
            .map_err(map_directory_error)?;

        let matches = account
            .as_ref()
            .is_some_and(|account| account.password == credentials.password());
        if !matches {
            warn!(phone = %phone.masked(), "login rejected");
            return Err(Error::unauthorized("invalid phone number or password"));
        }

        let now = self.clock.utc();
        let code = self.codes.issue();
        let token = SessionToken::mint(now);

        self.verifications
            .put(
                phone,
                PendingVerification::issue(code.clone(), now, self.policy.verification_ttl),
            )
            .await
            .map_err(map_verification_error)?;
        self.sessions
            .put(
                &token,
                LoginSession::start(phone.clone(), now, self.policy.session_ttl),
            )
            .await
            .map_err(map_session_error)?;

        self.notifier
            .send(
                phone,
                &format!("Your Kirra's Nail Studio verification code is: {code}"),
            )
            .await
            .map_err(map_sms_error)?;

        info!(phone = %phone.masked(), "verification code dispatched");
        Ok(LoginChallenge {
            session_token: token,
            masked_phone: phone.masked(),
        })
    }

    /// Look up a session that is still usable for completing verification.
    async fn pending_session(
        &self,
        phone: &PhoneNumber,
        token: &SessionToken,
    ) -> Result<LoginSession, Error> {
        let now = self.clock.utc();
        let session = self
            .sessions
            .get(token)
            .await
            .map_err(map_session_error)?
            .filter(|session| session.phone == *phone && !session.is_expired(now));
        session.ok_or_else(|| Error::unauthorized("invalid or expired session"))
    }

    /// Confirm the SMS code and promote the session to a full login.
    ///
    /// # Errors
    /// - [`Error::unauthorized`] on session or code problems; a wrong code
    ///   carries an `attemptsRemaining` detail.
    /// - [`Error::too_many_requests`] once the attempt cap is hit; the
    ///   session and code are voided so the user must log in again.
    /// - [`Error::internal`] when a port fails.
    pub async fn verify(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
        token: &SessionToken,
    ) -> Result<VerifiedLogin, Error> {
        let mut session = self.pending_session(phone, token).await?;
        let now = self.clock.utc();

        let Some(mut pending) = self
            .verifications
            .get(phone)
            .await
            .map_err(map_verification_error)?
            .filter(|pending| !pending.is_expired(now))
        else {
            return Err(Error::unauthorized("verification code expired"));
        };

        if pending.attempts >= self.policy.max_verification_attempts {
            self.verifications
                .remove(phone)
                .await
                .map_err(map_verification_error)?;
            self.sessions.remove(token).await.map_err(map_session_error)?;
            warn!(phone = %phone.masked(), "verification attempt cap hit");
            return Err(Error::too_many_requests(
                "too many attempts, please log in again",
            ));
        }

        if pending.code != *code {
            let attempts = pending.record_failure();
            let remaining = self
                .policy
                .max_verification_attempts
                .saturating_sub(attempts);
            self.verifications
                .put(phone, pending)
                .await
                .map_err(map_verification_error)?;
            return Err(Error::unauthorized("invalid verification code")
                .with_details(json!({ "attemptsRemaining": remaining })));
        }

        session.mark_verified(now, self.policy.verified_session_ttl);
        self.sessions
            .put(token, session)
            .await
            .map_err(map_session_error)?;
        self.verifications
            .remove(phone)
            .await
            .map_err(map_verification_error)?;

        let display_name = self
            .directory
            .find_by_phone(phone)
            .await
            .map_err(map_directory_error)?
            .map(|account| account.display_name);

        info!(phone = %phone.masked(), "login verified");
        Ok(VerifiedLogin {
            auth_token: token.clone(),
            masked_phone: phone.masked(),
            display_name,
        })
    }

    /// Issue and dispatch a replacement code, subject to the cooldown.
    ///
    /// # Errors
    /// - [`Error::unauthorized`] on session problems.
    /// - [`Error::too_many_requests`] inside the resend cooldown window.
    /// - [`Error::internal`] when a port fails.
    pub async fn resend(&self, phone: &PhoneNumber, token: &SessionToken) -> Result<(), Error> {
        let mut session = self.pending_session(phone, token).await?;
        let now = self.clock.utc();

        if !session.resend_allowed(now, self.policy.resend_cooldown) {
            return Err(Error::too_many_requests(
                "please wait before requesting another code",
            ));
        }

        let code = self.codes.issue();
        self.verifications
            .put(
                phone,
                PendingVerification::issue(code.clone(), now, self.policy.verification_ttl),
            )
            .await
            .map_err(map_verification_error)?;

        session.last_resend_at = Some(now);
        self.sessions
            .put(token, session)
            .await
            .map_err(map_session_error)?;

        self.notifier
            .send(
                phone,
                &format!("Your new Kirra's Nail Studio verification code is: {code}"),
            )
            .await
            .map_err(map_sms_error)?;

        info!(phone = %phone.masked(), "replacement code dispatched");
        Ok(())
    }

    /// Resolve the phone behind a verified, unexpired bearer token.
    pub async fn authenticated_phone(
        &self,
        token: &SessionToken,
    ) -> Result<Option<PhoneNumber>, Error> {
        let now = self.clock.utc();
        let session = self
            .sessions
            .get(token)
            .await
            .map_err(map_session_error)?
            .filter(|session| session.verified && !session.is_expired(now));
        Ok(session.map(|session| session.phone))
    }

    /// Whether a bearer token currently grants access.
    pub async fn token_is_valid(&self, token: &SessionToken) -> Result<bool, Error> {
        Ok(self.authenticated_phone(token).await?.is_some())
    }

    /// Drop the session behind `token`, if any.
    pub async fn logout(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions.remove(token).await.map_err(map_session_error)
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
