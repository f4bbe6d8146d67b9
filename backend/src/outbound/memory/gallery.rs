//! In-memory gallery metadata storage.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::gallery::{GalleryMedia, MediaKind};
use crate::domain::ports::{GalleryRepository, GalleryRepositoryError};

/// Process-local gallery store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryGalleryRepository {
    rows: RwLock<Vec<GalleryMedia>>,
}

impl InMemoryGalleryRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> GalleryRepositoryError {
    GalleryRepositoryError::storage("lock poisoned")
}

#[async_trait]
impl GalleryRepository for InMemoryGalleryRepository {
    async fn insert(&self, media: GalleryMedia) -> Result<(), GalleryRepositoryError> {
        self.rows.write().map_err(|_| poisoned())?.push(media);
        Ok(())
    }

    async fn list(&self, kind: MediaKind) -> Result<Vec<GalleryMedia>, GalleryRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|media| media.kind == kind)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        kind: MediaKind,
        id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError> {
        Ok(self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|media| media.kind == kind && media.id == id)
            .cloned())
    }

    async fn remove(
        &self,
        kind: MediaKind,
        id: Uuid,
    ) -> Result<Option<GalleryMedia>, GalleryRepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let index = rows
            .iter()
            .position(|media| media.kind == kind && media.id == id);
        Ok(index.map(|index| rows.swap_remove(index)))
    }
}
