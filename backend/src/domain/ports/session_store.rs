//! Port for the login session store.

use async_trait::async_trait;

use crate::domain::auth::{LoginSession, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "session store failed: {message}",
    }
}

/// Port for keeping login sessions keyed by bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `session` under `token`, replacing any previous entry.
    async fn put(
        &self,
        token: &SessionToken,
        session: LoginSession,
    ) -> Result<(), SessionStoreError>;

    /// Fetch the session stored under `token`.
    async fn get(&self, token: &SessionToken) -> Result<Option<LoginSession>, SessionStoreError>;

    /// Drop the session stored under `token`, if any.
    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
}

/// Fixture implementation for tests that never resolve a session.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionStore;

#[async_trait]
impl SessionStore for FixtureSessionStore {
    async fn put(
        &self,
        _token: &SessionToken,
        _session: LoginSession,
    ) -> Result<(), SessionStoreError> {
        Ok(())
    }

    async fn get(&self, _token: &SessionToken) -> Result<Option<LoginSession>, SessionStoreError> {
        Ok(None)
    }

    async fn remove(&self, _token: &SessionToken) -> Result<(), SessionStoreError> {
        Ok(())
    }
}
