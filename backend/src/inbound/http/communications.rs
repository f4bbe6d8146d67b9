//! Communications log HTTP handlers.
//!
//! ```text
//! GET  /api/communications
//! POST /api/communications
//! ```

use actix_web::{HttpResponse, get, post, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Communication, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

/// Request body for logging an ad hoc communication.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunicationRequest {
    /// Subject line; defaults to empty.
    pub subject: Option<String>,
    /// Message body.
    pub body: Option<String>,
    /// How many customers received it; defaults to one.
    pub recipient_count: Option<u32>,
}

fn map_storage_error(err: crate::domain::ports::CommunicationLogError) -> Error {
    Error::internal(format!("communication log unavailable: {err}"))
}

/// List every logged communication.
#[utoipa::path(
    get,
    path = "/api/communications",
    responses(
        (status = 200, description = "Communications", body = [Communication]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["communications"],
    operation_id = "listCommunications"
)]
#[get("")]
pub async fn list_communications(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Communication>>> {
    let rows = state
        .communications
        .list()
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(rows))
}

/// Log an ad hoc message the owner sent outside the dashboard flows.
#[utoipa::path(
    post,
    path = "/api/communications",
    request_body = CreateCommunicationRequest,
    responses(
        (status = 201, description = "Communication logged", body = Communication),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["communications"],
    operation_id = "createCommunication"
)]
#[post("")]
pub async fn create_communication(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommunicationRequest>,
) -> ApiResult<HttpResponse> {
    let CreateCommunicationRequest {
        subject,
        body,
        recipient_count,
    } = payload.into_inner();

    let communication = Communication::general(
        subject.unwrap_or_default(),
        require(body, FieldName::new("body"))?,
        recipient_count.unwrap_or(1),
        state.clock.utc(),
    );
    state
        .communications
        .record(communication.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(HttpResponse::Created().json(communication))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{get, post_json, test_state};
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
            web::scope("/api/communications")
                .service(list_communications)
                .service(create_communication),
        )
    }

    #[actix_web::test]
    async fn logged_messages_appear_in_the_list() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;

        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/communications",
                &json!({ "subject": "Closed Friday", "body": "We are closed this Friday." }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = actix_test::call_service(&app, get("/api/communications")).await;
        let listed: Value = actix_test::read_body_json(res).await;
        let rows = listed.as_array().expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows.first().and_then(|r| r.get("kind")).and_then(Value::as_str),
            Some("general")
        );
    }

    #[actix_web::test]
    async fn body_is_required() {
        let app = actix_test::init_service(test_app(test_state(&["111111"]))).await;
        let res = actix_test::call_service(
            &app,
            post_json("/api/communications", &json!({ "subject": "no body" })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
