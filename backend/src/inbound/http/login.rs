//! Login flow HTTP handlers.
//!
//! ```text
//! POST /api/auth/login   {"phone":"...","password":"..."}
//! POST /api/auth/verify  {"phone":"...","code":"123456","sessionToken":"..."}
//! POST /api/auth/resend  {"phone":"...","sessionToken":"..."}
//! POST /api/auth/verify-token   (Authorization: Bearer <token>)
//! POST /api/auth/logout         (Authorization: Bearer <token>)
//! GET  /api/status
//! ```

use actix_web::{get, post, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SessionToken,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_code, parse_phone, require};

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account phone number.
    pub phone: Option<String>,
    /// Account password.
    pub password: Option<String>,
}

/// Successful login response: verification is now pending.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Token to echo on verify/resend calls.
    pub session_token: String,
    /// Masked phone the code went to.
    pub masked_phone: String,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyPhone | LoginValidationError::InvalidPhone(_) => {
            ("phone", "invalid_phone")
        }
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": code }))
}

/// Check credentials and send a verification code to the account phone.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Verification code sent", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { phone, password } = payload.into_inner();
    let phone = require(phone, FieldName::new("phone"))?;
    let password = require(password, FieldName::new("password"))?;

    let credentials = LoginCredentials::try_from_parts(&phone, &password)
        .map_err(|err| map_login_validation_error(&err))?;
    let challenge = state.auth.login(&credentials).await?;

    Ok(web::Json(LoginResponse {
        message: "Verification code sent".to_owned(),
        session_token: challenge.session_token.as_str().to_owned(),
        masked_phone: challenge.masked_phone,
    }))
}

/// Verify request body for `POST /api/auth/verify`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// Account phone number.
    pub phone: Option<String>,
    /// The six-digit code from the SMS.
    pub code: Option<String>,
    /// Token returned by the login call.
    pub session_token: Option<String>,
}

/// Account summary embedded in the verify response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUser {
    /// Masked phone for display.
    pub phone: String,
    /// Display name, when the directory still has the account.
    pub name: Option<String>,
}

/// Successful verification response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Bearer token for subsequent requests.
    pub auth_token: String,
    /// Logged-in account summary.
    pub user: VerifiedUser,
}

/// Confirm the SMS code and receive the bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Login successful", body = VerifyResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Bad session or code", body = Error),
        (status = 429, description = "Attempt cap reached", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyLogin",
    security([])
)]
#[post("/verify")]
pub async fn verify(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyRequest>,
) -> ApiResult<web::Json<VerifyResponse>> {
    let VerifyRequest {
        phone,
        code,
        session_token,
    } = payload.into_inner();
    let phone = parse_phone(
        &require(phone, FieldName::new("phone"))?,
        FieldName::new("phone"),
    )?;
    let code = parse_code(
        &require(code, FieldName::new("code"))?,
        FieldName::new("code"),
    )?;
    let token = SessionToken::from_raw(require(
        session_token,
        FieldName::new("sessionToken"),
    )?);

    let verified = state.auth.verify(&phone, &code, &token).await?;

    Ok(web::Json(VerifyResponse {
        message: "Login successful".to_owned(),
        auth_token: verified.auth_token.as_str().to_owned(),
        user: VerifiedUser {
            phone: verified.masked_phone,
            name: verified.display_name,
        },
    }))
}

/// Resend request body for `POST /api/auth/resend`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResendRequest {
    /// Account phone number.
    pub phone: Option<String>,
    /// Token returned by the login call.
    pub session_token: Option<String>,
}

/// Send a replacement verification code.
#[utoipa::path(
    post,
    path = "/api/auth/resend",
    request_body = ResendRequest,
    responses(
        (status = 200, description = "New verification code sent", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Bad session", body = Error),
        (status = 429, description = "Cooldown not elapsed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "resendCode",
    security([])
)]
#[post("/resend")]
pub async fn resend(
    state: web::Data<HttpState>,
    payload: web::Json<ResendRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ResendRequest {
        phone,
        session_token,
    } = payload.into_inner();
    let phone = parse_phone(
        &require(phone, FieldName::new("phone"))?,
        FieldName::new("phone"),
    )?;
    let token = SessionToken::from_raw(require(
        session_token,
        FieldName::new("sessionToken"),
    )?);

    state.auth.resend(&phone, &token).await?;
    Ok(web::Json(MessageResponse::new("New verification code sent")))
}

/// Token check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenCheckResponse {
    /// Whether the bearer token currently grants access.
    pub valid: bool,
}

/// Report whether the presented bearer token is still good.
///
/// Always answers 200; a missing, unknown, or expired token is simply
/// `{"valid": false}` so the dashboard can poll without error handling.
#[utoipa::path(
    post,
    path = "/api/auth/verify-token",
    responses(
        (status = 200, description = "Token state", body = TokenCheckResponse),
    ),
    tags = ["auth"],
    operation_id = "verifyToken",
    security([])
)]
#[post("/verify-token")]
pub async fn verify_token(
    state: web::Data<HttpState>,
    bearer: BearerToken,
) -> web::Json<TokenCheckResponse> {
    let valid = match bearer.token() {
        Some(token) => state.auth.token_is_valid(token).await.unwrap_or(false),
        None => false,
    };
    web::Json(TokenCheckResponse { valid })
}

/// Drop the presented session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    bearer: BearerToken,
) -> ApiResult<web::Json<MessageResponse>> {
    if let Some(token) = bearer.token() {
        state.auth.logout(token).await?;
    }
    Ok(web::Json(MessageResponse::new("Logged out successfully")))
}

/// Directory entry in the status payload; passwords never leave the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUser {
    /// Account identifier.
    pub id: String,
    /// Login phone number.
    pub phone: String,
    /// Dashboard role.
    pub role: String,
}

/// Server status payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Fixed status banner.
    pub status: String,
    /// Known accounts, without credentials.
    pub users: Vec<StatusUser>,
    /// Current server time, RFC 3339.
    pub time: String,
}

/// Debugging endpoint reporting uptime and the account directory.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Server status", body = StatusResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "serverStatus",
    security([])
)]
#[get("/api/status")]
pub async fn status(state: web::Data<HttpState>) -> ApiResult<web::Json<StatusResponse>> {
    let users = state
        .directory
        .list()
        .await
        .map_err(|err| Error::internal(format!("user directory unavailable: {err}")))?
        .into_iter()
        .map(|account| StatusUser {
            id: account.id,
            phone: account.phone.as_str().to_owned(),
            role: match account.role {
                crate::domain::AccountRole::Admin => "admin".to_owned(),
                crate::domain::AccountRole::Customer => "customer".to_owned(),
            },
        })
        .collect();

    Ok(web::Json(StatusResponse {
        status: "Server is running".to_owned(),
        users,
        time: state.clock.utc().to_rfc3339(),
    }))
}
