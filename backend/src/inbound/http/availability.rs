//! Time-slot availability endpoint.
//!
//! ```text
//! GET /api/appointments/availability?date=2025-06-02&serviceType=gel
//! ```

use actix_web::{get, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, available_slots};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_service_type, require};

/// Query string for the availability endpoint.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Day to check, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Service to fit, e.g. `gel`.
    pub service_type: Option<String>,
}

/// One bookable slot in the response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotBody {
    /// Slot start, `HH:MM`.
    pub time: String,
    /// Minutes the service occupies.
    pub duration_minutes: u32,
}

/// Availability response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Day that was checked.
    pub date: String,
    /// Service the slots fit.
    pub service_type: String,
    /// Minutes the service occupies.
    pub duration_minutes: u32,
    /// Walk-in wait estimate for this service.
    pub estimated_wait_minutes: u32,
    /// Open slots, earliest first.
    pub slots: Vec<SlotBody>,
}

/// Enumerate open time slots for a service on a day.
///
/// Slots respect the weekly schedule, skip the lunch window, exclude
/// already-booked intervals, and for today start no earlier than the next
/// half-hour boundary.
#[utoipa::path(
    get,
    path = "/api/appointments/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Open slots", body = AvailabilityResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "listAvailability"
)]
#[get("/availability")]
pub async fn list_availability(
    state: web::Data<HttpState>,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let AvailabilityQuery { date, service_type } = query.into_inner();
    let date = parse_date(
        &require(date, FieldName::new("date"))?,
        FieldName::new("date"),
    )?;
    let service = parse_service_type(
        &require(service_type, FieldName::new("serviceType"))?,
        FieldName::new("serviceType"),
    )?;

    let hours = state
        .settings
        .working_hours()
        .await
        .map_err(|err| Error::internal(format!("settings unavailable: {err}")))?;
    let booked = state
        .appointments
        .list_by_date(date)
        .await
        .map_err(|err| Error::internal(format!("appointment storage unavailable: {err}")))?;

    let now = state.clock.local().naive_local();
    let slots = available_slots(&hours, date, service, &booked, now)
        .into_iter()
        .map(|slot| SlotBody {
            time: slot.start.format("%H:%M").to_string(),
            duration_minutes: slot.duration_minutes,
        })
        .collect();

    Ok(web::Json(AvailabilityResponse {
        date: date.format("%Y-%m-%d").to_string(),
        service_type: service.to_string(),
        duration_minutes: service.duration_minutes(),
        estimated_wait_minutes: service.average_wait_minutes(),
        slots,
    }))
}
