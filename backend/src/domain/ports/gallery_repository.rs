//! Port for gallery media metadata persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::gallery::{GalleryMedia, MediaKind};

use super::define_port_error;

define_port_error! {
    /// Errors raised by gallery repository adapters.
    pub enum GalleryRepositoryError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "gallery storage failed: {message}",
    }
}

/// Port for storing and reading gallery entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Persist a new gallery entry.
    async fn insert(&self, media: GalleryMedia) -> Result<(), GalleryRepositoryError>;

    /// All entries of `kind`, in upload order.
    async fn list(&self, kind: MediaKind) -> Result<Vec<GalleryMedia>, GalleryRepositoryError>;

    /// Find an entry of `kind` by id.
    async fn find(
        &self,
        kind: MediaKind,
        id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError>;

    /// Delete an entry of `kind`; returns the removed entry when it existed.
    async fn remove(
        &self,
        kind: MediaKind,
        id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError>;
}

/// Fixture implementation for tests that never touch the gallery.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGalleryRepository;

#[async_trait]
impl GalleryRepository for FixtureGalleryRepository {
    async fn insert(&self, _media: GalleryMedia) -> Result<(), GalleryRepositoryError> {
        Ok(())
    }

    async fn list(&self, _kind: MediaKind) -> Result<Vec<GalleryMedia>, GalleryRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _kind: MediaKind,
        _id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError> {
        Ok(None)
    }

    async fn remove(
        &self,
        _kind: MediaKind,
        _id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError> {
        Ok(None)
    }
}
