//! Appointment HTTP handlers.
//!
//! ```text
//! GET    /api/appointments
//! POST   /api/appointments
//! PUT    /api/appointments/{id}
//! DELETE /api/appointments/{id}
//! PUT    /api/appointments/{id}/payment
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Appointment, AppointmentDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_service_type, parse_time, require,
};

/// Request body for booking an appointment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    /// Client display name.
    pub client_name: Option<String>,
    /// Client email address.
    pub client_email: Option<String>,
    /// Client phone number.
    pub client_phone: Option<String>,
    /// Appointment day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Starting time, `HH:MM`.
    pub time: Option<String>,
    /// Requested service, e.g. `gel`.
    pub service_type: Option<String>,
    /// Quoted price in cents.
    pub service_price_cents: Option<i64>,
}

/// Request body for editing an appointment; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    /// New client display name.
    pub client_name: Option<String>,
    /// New client email address.
    pub client_email: Option<String>,
    /// New appointment day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// New starting time, `HH:MM`.
    pub time: Option<String>,
    /// New service.
    pub service_type: Option<String>,
    /// New quoted price in cents.
    pub service_price_cents: Option<i64>,
}

/// Request body for updating payment state.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdateRequest {
    /// Total received so far, in cents.
    pub amount_paid_cents: Option<i64>,
}

fn map_storage_error(err: crate::domain::ports::AppointmentRepositoryError) -> Error {
    Error::internal(format!("appointment storage unavailable: {err}"))
}

fn appointment_not_found() -> Error {
    Error::not_found("appointment not found")
}

/// List every appointment.
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments", body = [Appointment]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("")]
pub async fn list_appointments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Appointment>>> {
    let rows = state.appointments.list().await.map_err(map_storage_error)?;
    Ok(web::Json(rows))
}

/// Book an appointment.
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "createAppointment"
)]
#[post("")]
pub async fn create_appointment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAppointmentRequest>,
) -> ApiResult<HttpResponse> {
    let CreateAppointmentRequest {
        client_name,
        client_email,
        client_phone,
        date,
        time,
        service_type,
        service_price_cents,
    } = payload.into_inner();

    let draft = AppointmentDraft {
        client_name: require(client_name, FieldName::new("clientName"))?,
        client_email: require(client_email, FieldName::new("clientEmail"))?,
        client_phone: require(client_phone, FieldName::new("clientPhone"))?,
        date: parse_date(
            &require(date, FieldName::new("date"))?,
            FieldName::new("date"),
        )?,
        time: parse_time(
            &require(time, FieldName::new("time"))?,
            FieldName::new("time"),
        )?,
        service_type: parse_service_type(
            &require(service_type, FieldName::new("serviceType"))?,
            FieldName::new("serviceType"),
        )?,
        service_price_cents: require(
            service_price_cents,
            FieldName::new("servicePriceCents"),
        )?,
    };

    let appointment = Appointment::try_from_draft(draft, state.clock.utc())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state
        .appointments
        .insert(appointment.clone())
        .await
        .map_err(map_storage_error)?;

    Ok(HttpResponse::Created().json(appointment))
}

/// Edit an appointment.
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown appointment", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointment"
)]
#[put("/{id}")]
pub async fn update_appointment(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateAppointmentRequest>,
) -> ApiResult<web::Json<Appointment>> {
    let id = path.into_inner();
    let mut appointment = state
        .appointments
        .find(id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(appointment_not_found)?;

    let UpdateAppointmentRequest {
        client_name,
        client_email,
        date,
        time,
        service_type,
        service_price_cents,
    } = payload.into_inner();

    if let Some(name) = client_name {
        appointment.client_name = name;
    }
    if let Some(email) = client_email {
        appointment.client_email = email;
    }
    if let Some(raw) = date {
        appointment.date = parse_date(&raw, FieldName::new("date"))?;
    }
    if let Some(raw) = time {
        appointment.time = parse_time(&raw, FieldName::new("time"))?;
    }
    if let Some(raw) = service_type {
        appointment.service_type = parse_service_type(&raw, FieldName::new("serviceType"))?;
    }
    if let Some(price) = service_price_cents {
        if price < 0 {
            return Err(Error::invalid_request("service price must not be negative"));
        }
        appointment.service_price_cents = price;
    }

    state
        .appointments
        .update(appointment.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(appointment))
}

/// Cancel an appointment.
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    responses(
        (status = 204, description = "Appointment removed"),
        (status = 404, description = "Unknown appointment", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "deleteAppointment"
)]
#[delete("/{id}")]
pub async fn delete_appointment(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state
        .appointments
        .remove(path.into_inner())
        .await
        .map_err(map_storage_error)?;
    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(appointment_not_found())
    }
}

/// Record a payment against an appointment.
///
/// The payment status is derived from the amount: zero is unpaid, anything
/// below the quoted price is partial, and the rest is paid.
#[utoipa::path(
    put,
    path = "/api/appointments/{id}/payment",
    request_body = PaymentUpdateRequest,
    responses(
        (status = 200, description = "Updated appointment", body = Appointment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown appointment", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointmentPayment"
)]
#[put("/{id}/payment")]
pub async fn update_appointment_payment(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<PaymentUpdateRequest>,
) -> ApiResult<web::Json<Appointment>> {
    let id = path.into_inner();
    let mut appointment = state
        .appointments
        .find(id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(appointment_not_found)?;

    let amount = require(
        payload.into_inner().amount_paid_cents,
        FieldName::new("amountPaidCents"),
    )?;
    appointment
        .apply_payment(amount)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .appointments
        .update(appointment.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(appointment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{delete, get, post_json, put_json, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/appointments")
                .service(list_appointments)
                .service(create_appointment)
                .service(update_appointment_payment)
                .service(update_appointment)
                .service(delete_appointment),
        )
    }

    fn booking_body() -> Value {
        json!({
            "clientName": "Dana",
            "clientEmail": "dana@example.com",
            "clientPhone": "(555) 555-1234",
            "date": "2025-06-02",
            "time": "10:30",
            "serviceType": "gel",
            "servicePriceCents": 6500,
        })
    }

    #[actix_web::test]
    async fn booking_round_trips_through_the_list() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;

        let res =
            actix_test::call_service(&app, post_json("/api/appointments", &booking_body())).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            created.get("paymentStatus").and_then(Value::as_str),
            Some("unpaid")
        );
        assert_eq!(
            created.get("clientPhone").and_then(Value::as_str),
            Some("5555551234")
        );

        let res = actix_test::call_service(&app, get("/api/appointments")).await;
        let listed: Value = actix_test::read_body_json(res).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn booking_rejects_unknown_service_types() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let mut body = booking_body();
        body["serviceType"] = json!("haircut");

        let res = actix_test::call_service(&app, post_json("/api/appointments", &body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            err.get("details")
                .and_then(|d| d.get("field"))
                .and_then(Value::as_str),
            Some("serviceType")
        );
    }

    #[actix_web::test]
    async fn editing_an_unknown_appointment_is_not_found() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            put_json(
                &format!("/api/appointments/{}", Uuid::new_v4()),
                &json!({ "clientName": "Someone" }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn payment_updates_derive_the_status() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res =
            actix_test::call_service(&app, post_json("/api/appointments", &booking_body())).await;
        let created: Value = actix_test::read_body_json(res).await;
        let id = created.get("id").and_then(Value::as_str).expect("id");

        let res = actix_test::call_service(
            &app,
            put_json(
                &format!("/api/appointments/{id}/payment"),
                &json!({ "amountPaidCents": 2500 }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            updated.get("paymentStatus").and_then(Value::as_str),
            Some("partial")
        );
    }

    #[actix_web::test]
    async fn cancelling_removes_the_booking() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res =
            actix_test::call_service(&app, post_json("/api/appointments", &booking_body())).await;
        let created: Value = actix_test::read_body_json(res).await;
        let id = created.get("id").and_then(Value::as_str).expect("id");

        let res =
            actix_test::call_service(&app, delete(&format!("/api/appointments/{id}"))).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res =
            actix_test::call_service(&app, delete(&format!("/api/appointments/{id}"))).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
