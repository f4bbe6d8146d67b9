//! Payment HTTP handlers: payment views over appointments, reminders, and
//! provider settings.
//!
//! ```text
//! GET  /api/payments
//! POST /api/payment-reminder
//! POST /api/payment-reminders/bulk
//! GET  /api/payment-settings
//! PUT  /api/payment-settings
//! POST /api/payment-integrations/applepay
//! POST /api/payment-integrations/cashapp
//! POST /api/payment-integrations/venmo
//! ```

use actix_web::{get, post, put, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Appointment, Communication, Error, PaymentSettings, PaymentSettingsUpdate, PaymentStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// An appointment seen through the payments lens.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Appointment identifier.
    pub id: Uuid,
    /// Client display name.
    pub client_name: String,
    /// Client email used for reminders.
    pub client_email: String,
    /// Appointment day.
    pub date: String,
    /// Booked service.
    pub service_type: String,
    /// Quoted price in cents.
    pub service_price_cents: i64,
    /// Amount received so far in cents.
    pub amount_paid_cents: i64,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Outstanding balance in cents.
    pub balance_due_cents: i64,
}

impl From<Appointment> for PaymentRecord {
    fn from(appointment: Appointment) -> Self {
        let balance_due_cents = appointment.balance_due_cents();
        Self {
            id: appointment.id,
            client_name: appointment.client_name,
            client_email: appointment.client_email,
            date: appointment.date.format("%Y-%m-%d").to_string(),
            service_type: appointment.service_type.to_string(),
            service_price_cents: appointment.service_price_cents,
            amount_paid_cents: appointment.amount_paid_cents,
            payment_status: appointment.payment_status,
            balance_due_cents,
        }
    }
}

/// Request body for a one-off payment reminder.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReminderRequest {
    /// Recipient display name.
    pub recipient_name: Option<String>,
    /// Recipient email address.
    pub recipient_email: Option<String>,
    /// Appointment description used in the message body.
    pub appointment_label: Option<String>,
    /// Balance due in cents.
    pub balance_due_cents: Option<i64>,
}

/// Response for a one-off payment reminder.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReminderResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The logged communication record.
    pub reminder: Communication,
}

/// Request body for bulk payment reminders.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkRemindersRequest {
    /// Appointments to remind.
    pub appointment_ids: Option<Vec<Uuid>>,
}

/// Request body for connecting a payment provider.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectIntegrationRequest {
    /// Provider-side account handle.
    pub account: Option<String>,
}

fn map_appointment_error(err: crate::domain::ports::AppointmentRepositoryError) -> Error {
    Error::internal(format!("appointment storage unavailable: {err}"))
}

fn map_settings_error(err: crate::domain::ports::SettingsRepositoryError) -> Error {
    Error::internal(format!("settings storage unavailable: {err}"))
}

fn map_log_error(err: crate::domain::ports::CommunicationLogError) -> Error {
    Error::internal(format!("communication log unavailable: {err}"))
}

/// Appointments with their payment state and balances.
#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payment records", body = [PaymentRecord]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "listPayments"
)]
#[get("/payments")]
pub async fn list_payments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PaymentRecord>>> {
    let rows = state
        .appointments
        .list()
        .await
        .map_err(map_appointment_error)?;
    Ok(web::Json(rows.into_iter().map(PaymentRecord::from).collect()))
}

/// Compose and log a balance-due reminder for one client.
#[utoipa::path(
    post,
    path = "/api/payment-reminder",
    request_body = PaymentReminderRequest,
    responses(
        (status = 200, description = "Reminder logged", body = PaymentReminderResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "sendPaymentReminder"
)]
#[post("/payment-reminder")]
pub async fn send_payment_reminder(
    state: web::Data<HttpState>,
    payload: web::Json<PaymentReminderRequest>,
) -> ApiResult<web::Json<PaymentReminderResponse>> {
    let PaymentReminderRequest {
        recipient_name,
        recipient_email,
        appointment_label,
        balance_due_cents,
    } = payload.into_inner();

    let reminder = Communication::payment_reminder(
        require(recipient_name, FieldName::new("recipientName"))?,
        require(recipient_email, FieldName::new("recipientEmail"))?,
        &require(appointment_label, FieldName::new("appointmentLabel"))?,
        require(balance_due_cents, FieldName::new("balanceDueCents"))?,
        state.clock.utc(),
    );
    state
        .communications
        .record(reminder.clone())
        .await
        .map_err(map_log_error)?;

    Ok(web::Json(PaymentReminderResponse {
        message: "Payment reminder sent successfully".to_owned(),
        reminder,
    }))
}

/// Compose and log reminders for a batch of appointments.
///
/// Unknown ids and settled appointments are skipped; the response reports
/// how many reminders actually went out.
#[utoipa::path(
    post,
    path = "/api/payment-reminders/bulk",
    request_body = BulkRemindersRequest,
    responses(
        (status = 200, description = "Reminders logged", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "sendBulkPaymentReminders"
)]
#[post("/payment-reminders/bulk")]
pub async fn send_bulk_payment_reminders(
    state: web::Data<HttpState>,
    payload: web::Json<BulkRemindersRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ids = require(
        payload.into_inner().appointment_ids,
        FieldName::new("appointmentIds"),
    )?;

    let mut sent = 0_u32;
    for id in ids {
        let Some(appointment) = state
            .appointments
            .find(id)
            .await
            .map_err(map_appointment_error)?
        else {
            continue;
        };
        if appointment.balance_due_cents() == 0 {
            continue;
        }

        let label = format!(
            "{} appointment on {}",
            appointment.service_type,
            appointment.date.format("%Y-%m-%d"),
        );
        let reminder = Communication::payment_reminder(
            appointment.client_name.clone(),
            appointment.client_email.clone(),
            &label,
            appointment.balance_due_cents(),
            state.clock.utc(),
        );
        state
            .communications
            .record(reminder)
            .await
            .map_err(map_log_error)?;
        sent += 1;
    }

    Ok(web::Json(MessageResponse::new(format!(
        "{sent} payment reminders sent successfully"
    ))))
}

/// Current payment settings and provider integrations.
#[utoipa::path(
    get,
    path = "/api/payment-settings",
    responses(
        (status = 200, description = "Payment settings", body = PaymentSettings),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "getPaymentSettings"
)]
#[get("/payment-settings")]
pub async fn get_payment_settings(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PaymentSettings>> {
    let settings = state
        .settings
        .payment_settings()
        .await
        .map_err(map_settings_error)?;
    Ok(web::Json(settings))
}

/// Merge a partial update into the payment settings.
#[utoipa::path(
    put,
    path = "/api/payment-settings",
    request_body = PaymentSettingsUpdate,
    responses(
        (status = 200, description = "Updated settings", body = PaymentSettings),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "updatePaymentSettings"
)]
#[put("/payment-settings")]
pub async fn update_payment_settings(
    state: web::Data<HttpState>,
    payload: web::Json<PaymentSettingsUpdate>,
) -> ApiResult<web::Json<PaymentSettings>> {
    let mut settings = state
        .settings
        .payment_settings()
        .await
        .map_err(map_settings_error)?;
    settings.merge(payload.into_inner());
    state
        .settings
        .set_payment_settings(settings.clone())
        .await
        .map_err(map_settings_error)?;
    Ok(web::Json(settings))
}

async fn connect_integration(
    state: &HttpState,
    provider: &str,
    account: Option<String>,
) -> ApiResult<PaymentSettings> {
    let account = require(account, FieldName::new("account"))?;
    let mut settings = state
        .settings
        .payment_settings()
        .await
        .map_err(map_settings_error)?;

    match provider {
        "applepay" => settings.integrations.apple_pay.connect(account),
        "cashapp" => settings.integrations.cash_app.connect(account),
        "venmo" => settings.integrations.venmo.connect(account),
        other => {
            return Err(Error::invalid_request(format!(
                "unknown payment provider {other:?}"
            )));
        }
    }

    state
        .settings
        .set_payment_settings(settings.clone())
        .await
        .map_err(map_settings_error)?;
    Ok(settings)
}

/// Link an Apple Pay merchant id.
#[utoipa::path(
    post,
    path = "/api/payment-integrations/applepay",
    request_body = ConnectIntegrationRequest,
    responses(
        (status = 200, description = "Integration connected", body = PaymentSettings),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "connectApplePay"
)]
#[post("/payment-integrations/applepay")]
pub async fn connect_applepay(
    state: web::Data<HttpState>,
    payload: web::Json<ConnectIntegrationRequest>,
) -> ApiResult<web::Json<PaymentSettings>> {
    let settings =
        connect_integration(&state, "applepay", payload.into_inner().account).await?;
    Ok(web::Json(settings))
}

/// Link a Cash App handle.
#[utoipa::path(
    post,
    path = "/api/payment-integrations/cashapp",
    request_body = ConnectIntegrationRequest,
    responses(
        (status = 200, description = "Integration connected", body = PaymentSettings),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "connectCashApp"
)]
#[post("/payment-integrations/cashapp")]
pub async fn connect_cashapp(
    state: web::Data<HttpState>,
    payload: web::Json<ConnectIntegrationRequest>,
) -> ApiResult<web::Json<PaymentSettings>> {
    let settings = connect_integration(&state, "cashapp", payload.into_inner().account).await?;
    Ok(web::Json(settings))
}

/// Link a Venmo username.
#[utoipa::path(
    post,
    path = "/api/payment-integrations/venmo",
    request_body = ConnectIntegrationRequest,
    responses(
        (status = 200, description = "Integration connected", body = PaymentSettings),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "connectVenmo"
)]
#[post("/payment-integrations/venmo")]
pub async fn connect_venmo(
    state: web::Data<HttpState>,
    payload: web::Json<ConnectIntegrationRequest>,
) -> ApiResult<web::Json<PaymentSettings>> {
    let settings = connect_integration(&state, "venmo", payload.into_inner().account).await?;
    Ok(web::Json(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::appointments::{create_appointment, update_appointment_payment};
    use crate::inbound::http::test_utils::{get, post_json, put_json, test_state};
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
        App::new()
            .app_data(state)
            .service(
                web::scope("/api/appointments")
                    .service(create_appointment)
                    .service(update_appointment_payment),
            )
            .service(
                web::scope("/api")
                    .service(list_payments)
                    .service(send_payment_reminder)
                    .service(send_bulk_payment_reminders)
                    .service(get_payment_settings)
                    .service(update_payment_settings)
                    .service(connect_applepay)
                    .service(connect_cashapp)
                    .service(connect_venmo),
            )
    }

    async fn seed_appointment<S>(app: &S) -> String
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = actix_test::call_service(
            app,
            post_json(
                "/api/appointments",
                &json!({
                    "clientName": "Dana",
                    "clientEmail": "dana@example.com",
                    "clientPhone": "5555551234",
                    "date": "2027-06-08",
                    "time": "10:00",
                    "serviceType": "gel",
                    "servicePriceCents": 6500,
                }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        body.get("id").and_then(Value::as_str).expect("id").to_owned()
    }

    #[actix_web::test]
    async fn payments_view_reports_balances() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let id = seed_appointment(&app).await;

        let res = actix_test::call_service(
            &app,
            put_json(
                &format!("/api/appointments/{id}/payment"),
                &json!({ "amountPaidCents": 2500 }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(&app, get("/api/payments")).await;
        let rows: Value = actix_test::read_body_json(res).await;
        let record = rows.as_array().and_then(|r| r.first()).expect("record");
        assert_eq!(
            record.get("balanceDueCents").and_then(Value::as_i64),
            Some(4000)
        );
        assert_eq!(
            record.get("paymentStatus").and_then(Value::as_str),
            Some("partial")
        );
    }

    #[actix_web::test]
    async fn bulk_reminders_skip_settled_and_unknown_appointments() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let owing = seed_appointment(&app).await;
        let settled = seed_appointment(&app).await;
        let res = actix_test::call_service(
            &app,
            put_json(
                &format!("/api/appointments/{settled}/payment"),
                &json!({ "amountPaidCents": 6500 }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/payment-reminders/bulk",
                &json!({ "appointmentIds": [owing, settled, Uuid::new_v4()] }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("1 payment reminders sent successfully")
        );
    }

    #[actix_web::test]
    async fn reminder_bodies_spell_out_the_dollars() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/payment-reminder",
                &json!({
                    "recipientName": "Dana",
                    "recipientEmail": "dana@example.com",
                    "appointmentLabel": "gel appointment on 2027-06-08",
                    "balanceDueCents": 4000,
                }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let text = body
            .get("reminder")
            .and_then(|r| r.get("body"))
            .and_then(Value::as_str)
            .expect("body");
        assert!(text.contains("$40.00"));
    }

    #[actix_web::test]
    async fn integrations_connect_and_persist() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/payment-integrations/cashapp",
                &json!({ "account": "$kirranails" }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(&app, get("/api/payment-settings")).await;
        let settings: Value = actix_test::read_body_json(res).await;
        let cash_app = settings
            .get("integrations")
            .and_then(|i| i.get("cashApp"))
            .expect("cashApp");
        assert_eq!(cash_app.get("connected"), Some(&Value::Bool(true)));
        assert_eq!(
            cash_app.get("account").and_then(Value::as_str),
            Some("$kirranails")
        );
    }

    #[actix_web::test]
    async fn settings_updates_merge() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            put_json("/api/payment-settings", &json!({ "autoReminders": true })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let settings: Value = actix_test::read_body_json(res).await;
        assert_eq!(settings.get("autoReminders"), Some(&Value::Bool(true)));
        assert_eq!(
            settings.get("reminderFrequencyDays").and_then(Value::as_u64),
            Some(7)
        );
    }
}
