//! Port for the external media file store.
//!
//! Upload handling lives outside this system; the backend only asks the
//! store for serving URLs and tells it when a file can be discarded.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by media store adapters.
    pub enum MediaStoreError {
        /// The store rejected the operation.
        Storage { message: String } =>
            "media store failed: {message}",
    }
}

/// Port for resolving and discarding stored media files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Public URL the file at `filename` is served from.
    async fn url_for(&self, filename: &str) -> Result<String, MediaStoreError>;

    /// Discard the stored file at `filename`, if it exists.
    async fn discard(&self, filename: &str) -> Result<(), MediaStoreError>;
}

/// Fixture implementation that mints `/uploads/` URLs and discards nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMediaStore;

#[async_trait]
impl MediaStore for FixtureMediaStore {
    async fn url_for(&self, filename: &str) -> Result<String, MediaStoreError> {
        Ok(format!("/uploads/{filename}"))
    }

    async fn discard(&self, _filename: &str) -> Result<(), MediaStoreError> {
        Ok(())
    }
}
