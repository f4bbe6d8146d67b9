//! Promo code HTTP handlers.
//!
//! ```text
//! GET    /api/promo-codes
//! POST   /api/promo-codes
//! PUT    /api/promo-codes/{id}
//! DELETE /api/promo-codes/{id}
//! POST   /api/promo-codes/send
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Communication, Error, PromoCode, PromoDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, require};

/// Request body for creating a promo code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromoRequest {
    /// The code customers type at checkout.
    pub code: Option<String>,
    /// Discount in whole percent, `1..=100`.
    pub discount_percent: Option<u8>,
    /// Last day the code is honoured, `YYYY-MM-DD`; omit for permanent.
    pub expires_on: Option<String>,
}

/// Request body for editing a promo; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromoRequest {
    /// New discount in whole percent.
    pub discount_percent: Option<u8>,
    /// New expiry day.
    pub expires_on: Option<String>,
    /// Switch the code on or off.
    pub is_active: Option<bool>,
}

/// Who should receive a promo code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RecipientSelector {
    /// The literal string `all`.
    All(String),
    /// An explicit list of customer ids.
    Ids(Vec<Uuid>),
}

/// Request body for distributing a promo code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendPromoRequest {
    /// Promo to distribute.
    pub promo_code_id: Option<Uuid>,
    /// `"all"` or explicit customer ids.
    pub customer_ids: Option<RecipientSelector>,
    /// Custom message text; a default is composed when absent.
    pub message_text: Option<String>,
}

/// Distribution summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendPromoResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// How many customers were addressed.
    pub recipients: u32,
    /// The logged communication record.
    pub communication: Communication,
}

fn map_storage_error(err: crate::domain::ports::PromoRepositoryError) -> Error {
    Error::internal(format!("promo storage unavailable: {err}"))
}

fn promo_not_found() -> Error {
    Error::not_found("promo code not found")
}

/// List every promo code.
#[utoipa::path(
    get,
    path = "/api/promo-codes",
    responses(
        (status = 200, description = "Promo codes", body = [PromoCode]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["promos"],
    operation_id = "listPromoCodes"
)]
#[get("")]
pub async fn list_promos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PromoCode>>> {
    let rows = state.promos.list().await.map_err(map_storage_error)?;
    Ok(web::Json(rows))
}

/// Create a promo code.
#[utoipa::path(
    post,
    path = "/api/promo-codes",
    request_body = CreatePromoRequest,
    responses(
        (status = 201, description = "Promo created", body = PromoCode),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["promos"],
    operation_id = "createPromoCode"
)]
#[post("")]
pub async fn create_promo(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePromoRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePromoRequest {
        code,
        discount_percent,
        expires_on,
    } = payload.into_inner();

    let expires_on = expires_on
        .map(|raw| parse_date(&raw, FieldName::new("expiresOn")))
        .transpose()?;
    let draft = PromoDraft {
        code: require(code, FieldName::new("code"))?,
        discount_percent: require(discount_percent, FieldName::new("discountPercent"))?,
        expires_on,
    };
    let promo = PromoCode::try_from_draft(draft, state.clock.utc())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .promos
        .insert(promo.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(HttpResponse::Created().json(promo))
}

/// Edit a promo code.
#[utoipa::path(
    put,
    path = "/api/promo-codes/{id}",
    request_body = UpdatePromoRequest,
    responses(
        (status = 200, description = "Updated promo", body = PromoCode),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown promo", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["promos"],
    operation_id = "updatePromoCode"
)]
#[put("/{id}")]
pub async fn update_promo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdatePromoRequest>,
) -> ApiResult<web::Json<PromoCode>> {
    let id = path.into_inner();
    let mut promo = state
        .promos
        .find(id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(promo_not_found)?;

    let UpdatePromoRequest {
        discount_percent,
        expires_on,
        is_active,
    } = payload.into_inner();

    if let Some(percent) = discount_percent {
        if percent == 0 || percent > 100 {
            return Err(Error::invalid_request(format!(
                "discount must be between 1 and 100 percent, got {percent}"
            )));
        }
        promo.discount_percent = percent;
    }
    if let Some(raw) = expires_on {
        promo.expires_on = Some(parse_date(&raw, FieldName::new("expiresOn"))?);
    }
    if let Some(active) = is_active {
        promo.is_active = active;
    }

    state
        .promos
        .update(promo.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(promo))
}

/// Remove a promo code.
#[utoipa::path(
    delete,
    path = "/api/promo-codes/{id}",
    responses(
        (status = 200, description = "Promo removed", body = MessageResponse),
        (status = 404, description = "Unknown promo", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["promos"],
    operation_id = "deletePromoCode"
)]
#[delete("/{id}")]
pub async fn delete_promo(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    let removed = state
        .promos
        .remove(path.into_inner())
        .await
        .map_err(map_storage_error)?;
    if removed {
        Ok(web::Json(MessageResponse::new(
            "Promo code deleted successfully",
        )))
    } else {
        Err(promo_not_found())
    }
}

/// Distribute a promo code to customers and log the blast.
#[utoipa::path(
    post,
    path = "/api/promo-codes/send",
    request_body = SendPromoRequest,
    responses(
        (status = 200, description = "Promo sent", body = SendPromoResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown promo", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["promos"],
    operation_id = "sendPromoCode"
)]
#[post("/send")]
pub async fn send_promo(
    state: web::Data<HttpState>,
    payload: web::Json<SendPromoRequest>,
) -> ApiResult<web::Json<SendPromoResponse>> {
    let SendPromoRequest {
        promo_code_id,
        customer_ids,
        message_text,
    } = payload.into_inner();

    let promo_id = require(promo_code_id, FieldName::new("promoCodeId"))?;
    let mut promo = state
        .promos
        .find(promo_id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(promo_not_found)?;

    let customers = state
        .customers
        .list()
        .await
        .map_err(|err| Error::internal(format!("customer storage unavailable: {err}")))?;
    let recipients = match require(customer_ids, FieldName::new("customerIds"))? {
        RecipientSelector::All(keyword) if keyword == "all" => customers.len(),
        RecipientSelector::All(other) => {
            return Err(Error::invalid_request(format!(
                "customerIds must be \"all\" or a list of ids, got {other:?}"
            )));
        }
        RecipientSelector::Ids(ids) => customers
            .iter()
            .filter(|customer| ids.contains(&customer.id))
            .count(),
    };
    let recipients = u32::try_from(recipients)
        .map_err(|_| Error::internal("recipient count overflow"))?;

    let communication = Communication::promo_blast(
        &promo.code,
        promo.discount_percent,
        message_text,
        recipients,
        state.clock.utc(),
    );
    state
        .communications
        .record(communication.clone())
        .await
        .map_err(|err| Error::internal(format!("communication log unavailable: {err}")))?;

    promo.record_distribution(recipients);
    state
        .promos
        .update(promo)
        .await
        .map_err(map_storage_error)?;

    Ok(web::Json(SendPromoResponse {
        message: format!("Promo code sent to {recipients} customers successfully!"),
        recipients,
        communication,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::customers::create_customer;
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
                web::scope("/api/promo-codes")
                    .service(send_promo)
                    .service(list_promos)
                    .service(create_promo)
                    .service(update_promo)
                    .service(delete_promo),
            )
            .service(web::scope("/api/customers").service(create_customer))
    }

    async fn seed_customer<S>(app: &S, name: &str)
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
                "/api/customers",
                &json!({ "name": name, "email": format!("{name}@example.com") }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn created_codes_are_upper_cased_and_active() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/promo-codes",
                &json!({ "code": "spring20", "discountPercent": 20 }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(res).await;
        assert_eq!(created.get("code").and_then(Value::as_str), Some("SPRING20"));
        assert_eq!(created.get("isActive"), Some(&Value::Bool(true)));
        assert_eq!(created.get("used").and_then(Value::as_u64), Some(0));
    }

    #[actix_web::test]
    async fn zero_discount_is_rejected() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/promo-codes",
                &json!({ "code": "FREE", "discountPercent": 0 }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn sending_to_all_counts_every_customer_and_bumps_usage() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        seed_customer(&app, "maya").await;
        seed_customer(&app, "iris").await;

        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/promo-codes",
                &json!({ "code": "VIP", "discountPercent": 25 }),
            ),
        )
        .await;
        let promo: Value = actix_test::read_body_json(res).await;
        let id = promo.get("id").and_then(Value::as_str).expect("id");

        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/promo-codes/send",
                &json!({ "promoCodeId": id, "customerIds": "all" }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let sent: Value = actix_test::read_body_json(res).await;
        assert_eq!(sent.get("recipients").and_then(Value::as_u64), Some(2));

        let res = actix_test::call_service(&app, get("/api/promo-codes")).await;
        let listed: Value = actix_test::read_body_json(res).await;
        let used = listed
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("used"))
            .and_then(Value::as_u64);
        assert_eq!(used, Some(2));
    }

    #[actix_web::test]
    async fn deactivating_a_code_round_trips() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/promo-codes",
                &json!({ "code": "OFF", "discountPercent": 10 }),
            ),
        )
        .await;
        let promo: Value = actix_test::read_body_json(res).await;
        let id = promo.get("id").and_then(Value::as_str).expect("id");

        let res = actix_test::call_service(
            &app,
            put_json(
                &format!("/api/promo-codes/{id}"),
                &json!({ "isActive": false }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: Value = actix_test::read_body_json(res).await;
        assert_eq!(updated.get("isActive"), Some(&Value::Bool(false)));
    }
}
