//! Gallery metadata HTTP handlers.
//!
//! File bytes never pass through these endpoints; the upload pipeline lives
//! with the external media store. These handlers register, list, and retire
//! the metadata the dashboard renders.
//!
//! ```text
//! GET    /api/gallery/photos
//! POST   /api/gallery/photos
//! DELETE /api/gallery/photos/{id}
//! GET    /api/gallery/videos
//! POST   /api/gallery/videos
//! DELETE /api/gallery/videos/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, GalleryDraft, GalleryMedia, MediaKind, SocialPlatform};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request body for registering a stored file in the gallery.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMediaRequest {
    /// Storage filename minted by the media store.
    pub filename: Option<String>,
    /// Filename the owner uploaded.
    pub original_name: Option<String>,
    /// Caption shown under the piece.
    pub caption: Option<String>,
    /// Platforms the piece was shared to.
    pub social_platforms: Option<Vec<SocialPlatform>>,
}

fn map_storage_error(err: crate::domain::ports::GalleryRepositoryError) -> Error {
    Error::internal(format!("gallery storage unavailable: {err}"))
}

fn map_media_error(err: crate::domain::ports::MediaStoreError) -> Error {
    Error::internal(format!("media store unavailable: {err}"))
}

async fn list_media(state: &HttpState, kind: MediaKind) -> ApiResult<Vec<GalleryMedia>> {
    state.gallery.list(kind).await.map_err(map_storage_error)
}

async fn register_media(
    state: &HttpState,
    kind: MediaKind,
    payload: RegisterMediaRequest,
) -> ApiResult<GalleryMedia> {
    let RegisterMediaRequest {
        filename,
        original_name,
        caption,
        social_platforms,
    } = payload;

    let draft = GalleryDraft {
        kind,
        filename: require(filename, FieldName::new("filename"))?,
        original_name,
        caption,
        social_platforms: social_platforms.unwrap_or_default(),
    };
    let url = state
        .media
        .url_for(&draft.filename)
        .await
        .map_err(map_media_error)?;
    let media = GalleryMedia::try_from_draft(draft, url, state.clock.utc())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .gallery
        .insert(media.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(media)
}

async fn remove_media(state: &HttpState, kind: MediaKind, id: Uuid) -> ApiResult<()> {
    let removed = state
        .gallery
        .remove(kind, id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(|| match kind {
            MediaKind::Photo => Error::not_found("photo not found"),
            MediaKind::Video => Error::not_found("video not found"),
        })?;

    // The metadata row is already gone; losing the file bytes too is best
    // effort from the caller's point of view, but surface store failures.
    state
        .media
        .discard(&removed.filename)
        .await
        .map_err(map_media_error)
}

/// List gallery photos.
#[utoipa::path(
    get,
    path = "/api/gallery/photos",
    responses(
        (status = 200, description = "Photos", body = [GalleryMedia]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "listPhotos"
)]
#[get("/photos")]
pub async fn list_photos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GalleryMedia>>> {
    Ok(web::Json(list_media(&state, MediaKind::Photo).await?))
}

/// Register a stored photo.
#[utoipa::path(
    post,
    path = "/api/gallery/photos",
    request_body = RegisterMediaRequest,
    responses(
        (status = 201, description = "Photo registered", body = GalleryMedia),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "registerPhoto"
)]
#[post("/photos")]
pub async fn register_photo(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterMediaRequest>,
) -> ApiResult<HttpResponse> {
    let media = register_media(&state, MediaKind::Photo, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(media))
}

/// Retire a photo and discard its file.
#[utoipa::path(
    delete,
    path = "/api/gallery/photos/{id}",
    responses(
        (status = 200, description = "Photo removed", body = MessageResponse),
        (status = 404, description = "Unknown photo", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "deletePhoto"
)]
#[delete("/photos/{id}")]
pub async fn delete_photo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    remove_media(&state, MediaKind::Photo, path.into_inner()).await?;
    Ok(web::Json(MessageResponse::new("Photo deleted successfully")))
}

/// List gallery videos.
#[utoipa::path(
    get,
    path = "/api/gallery/videos",
    responses(
        (status = 200, description = "Videos", body = [GalleryMedia]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "listVideos"
)]
#[get("/videos")]
pub async fn list_videos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GalleryMedia>>> {
    Ok(web::Json(list_media(&state, MediaKind::Video).await?))
}

/// Register a stored video.
#[utoipa::path(
    post,
    path = "/api/gallery/videos",
    request_body = RegisterMediaRequest,
    responses(
        (status = 201, description = "Video registered", body = GalleryMedia),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "registerVideo"
)]
#[post("/videos")]
pub async fn register_video(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterMediaRequest>,
) -> ApiResult<HttpResponse> {
    let media = register_media(&state, MediaKind::Video, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(media))
}

/// Retire a video and discard its file.
#[utoipa::path(
    delete,
    path = "/api/gallery/videos/{id}",
    responses(
        (status = 200, description = "Video removed", body = MessageResponse),
        (status = 404, description = "Unknown video", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gallery"],
    operation_id = "deleteVideo"
)]
#[delete("/videos/{id}")]
pub async fn delete_video(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    remove_media(&state, MediaKind::Video, path.into_inner()).await?;
    Ok(web::Json(MessageResponse::new("Video deleted successfully")))
}
