//! In-memory login session and verification code stores.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::auth::{LoginSession, PendingVerification, SessionToken};
use crate::domain::phone::PhoneNumber;
use crate::domain::ports::{
    SessionStore, SessionStoreError, VerificationStore, VerificationStoreError,
};

/// Process-local session store keyed by bearer token.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, LoginSession>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        token: &SessionToken,
        session: LoginSession,
    ) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .map_err(|_| SessionStoreError::storage("lock poisoned"))?
            .insert(token.as_str().to_owned(), session);
        Ok(())
    }

    async fn get(&self, token: &SessionToken) -> Result<Option<LoginSession>, SessionStoreError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionStoreError::storage("lock poisoned"))?
            .get(token.as_str())
            .cloned())
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .map_err(|_| SessionStoreError::storage("lock poisoned"))?
            .remove(token.as_str());
        Ok(())
    }
}

/// Process-local pending verification store keyed by phone number.
#[derive(Debug, Default)]
pub struct InMemoryVerificationStore {
    codes: RwLock<HashMap<String, PendingVerification>>,
}

impl InMemoryVerificationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn put(
        &self,
        phone: &PhoneNumber,
        pending: PendingVerification,
    ) -> Result<(), VerificationStoreError> {
        self.codes
            .write()
            .map_err(|_| VerificationStoreError::storage("lock poisoned"))?
            .insert(phone.as_str().to_owned(), pending);
        Ok(())
    }

    async fn get(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<PendingVerification>, VerificationStoreError> {
        Ok(self
            .codes
            .read()
            .map_err(|_| VerificationStoreError::storage("lock poisoned"))?
            .get(phone.as_str())
            .cloned())
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), VerificationStoreError> {
        self.codes
            .write()
            .map_err(|_| VerificationStoreError::storage("lock poisoned"))?
            .remove(phone.as_str());
        Ok(())
    }
}
