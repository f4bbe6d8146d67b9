//! Gallery media metadata.
//!
//! The backend tracks metadata only; file bytes live with an external media
//! store reached through a port. Social platform tags record where a piece
//! was shared, nothing more.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Whether a gallery entry is a photo or a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Photo,
    /// Video clip.
    Video,
}

/// Social platforms a gallery entry can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    /// Instagram feed and stories.
    Instagram,
    /// TikTok clips.
    Tiktok,
    /// Facebook business page.
    Facebook,
    /// X, formerly Twitter.
    Twitter,
    /// Snapchat stories.
    Snapchat,
}

/// Metadata for one stored photo or video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryMedia {
    /// Unique media identifier.
    pub id: Uuid,
    /// Photo or video.
    pub kind: MediaKind,
    /// Storage filename minted by the media store.
    pub filename: String,
    /// Filename the owner uploaded.
    pub original_name: String,
    /// Public URL where the file is served.
    pub url: String,
    /// Caption shown under the piece.
    pub caption: String,
    /// Platforms the piece was shared to.
    pub social_platforms: Vec<SocialPlatform>,
    /// Instant the entry was registered.
    pub uploaded_at: DateTime<Utc>,
}

/// Validation failure for a gallery draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryValidationError;

impl fmt::Display for GalleryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media filename must not be empty")
    }
}

impl std::error::Error for GalleryValidationError {}

/// Unvalidated gallery fields as supplied by an inbound adapter.
#[derive(Debug, Clone)]
pub struct GalleryDraft {
    /// Photo or video.
    pub kind: MediaKind,
    /// Storage filename.
    pub filename: String,
    /// Original filename; defaults to the storage filename when blank.
    pub original_name: Option<String>,
    /// Caption; defaults to empty.
    pub caption: Option<String>,
    /// Platform tags.
    pub social_platforms: Vec<SocialPlatform>,
}

impl GalleryMedia {
    /// Validate a draft into a gallery entry served from `url`.
    pub fn try_from_draft(
        draft: GalleryDraft,
        url: String,
        uploaded_at: DateTime<Utc>,
    ) -> Result<Self, GalleryValidationError> {
        let filename = draft.filename.trim().to_owned();
        if filename.is_empty() {
            return Err(GalleryValidationError);
        }
        let original_name = draft
            .original_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| filename.clone());

        Ok(Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            filename,
            original_name,
            url,
            caption: draft.caption.unwrap_or_default(),
            social_platforms: draft.social_platforms,
            uploaded_at,
        })
    }
}
