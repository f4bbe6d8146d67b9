//! Working-hours settings HTTP handlers.
//!
//! ```text
//! GET /api/settings/working-hours
//! PUT /api/settings/working-hours
//! ```

use actix_web::{get, put, web};

use crate::domain::{Error, WeeklyHours};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_settings_error(err: crate::domain::ports::SettingsRepositoryError) -> Error {
    Error::internal(format!("settings storage unavailable: {err}"))
}

/// The weekly opening schedule availability is computed from.
#[utoipa::path(
    get,
    path = "/api/settings/working-hours",
    responses(
        (status = 200, description = "Weekly schedule", body = WeeklyHours),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["settings"],
    operation_id = "getWorkingHours"
)]
#[get("/working-hours")]
pub async fn get_working_hours(state: web::Data<HttpState>) -> ApiResult<web::Json<WeeklyHours>> {
    let hours = state
        .settings
        .working_hours()
        .await
        .map_err(map_settings_error)?;
    Ok(web::Json(hours))
}

/// Replace the weekly opening schedule.
#[utoipa::path(
    put,
    path = "/api/settings/working-hours",
    request_body = WeeklyHours,
    responses(
        (status = 200, description = "Updated schedule", body = WeeklyHours),
        (status = 400, description = "Inconsistent hours", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["settings"],
    operation_id = "updateWorkingHours"
)]
#[put("/working-hours")]
pub async fn update_working_hours(
    state: web::Data<HttpState>,
    payload: web::Json<WeeklyHours>,
) -> ApiResult<web::Json<WeeklyHours>> {
    let hours = payload.into_inner();
    hours
        .validate()
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .settings
        .set_working_hours(hours)
        .await
        .map_err(map_settings_error)?;
    Ok(web::Json(hours))
}
