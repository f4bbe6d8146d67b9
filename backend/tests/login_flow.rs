//! End-to-end coverage of the phone + SMS-code login flow over the fully
//! wired application.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use support::{full_app, get, harness, post_bearer, post_json};

#[actix_web::test]
async fn the_whole_flow_from_password_to_bearer_token() {
    let h = harness(&["424242"]);
    let app = actix_test::init_service(full_app(h.state.clone())).await;

    // Password check dispatches a code over SMS.
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/login",
            &json!({ "phone": "(317) 432-3276", "password": "Admin123!" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    let session_token = body
        .get("sessionToken")
        .and_then(Value::as_str)
        .expect("session token")
        .to_owned();
    assert_eq!(
        body.get("maskedPhone").and_then(Value::as_str),
        Some("(317) 432-****")
    );

    let sent = h.sms.sent();
    assert_eq!(sent.len(), 1, "exactly one code dispatched");
    let (to, sms_body) = sent.first().expect("one sms");
    assert_eq!(to, "3174323276");
    assert!(sms_body.contains("424242"));

    // The unverified session token grants nothing yet.
    let res = actix_test::call_service(
        &app,
        post_bearer("/api/auth/verify-token", &session_token),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("valid"), Some(&Value::Bool(false)));

    // Confirming the code promotes the session.
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({
                "phone": "3174323276",
                "code": "424242",
                "sessionToken": session_token,
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("user")
            .and_then(|u| u.get("name"))
            .and_then(Value::as_str),
        Some("Kirra Admin")
    );
    let auth_token = body
        .get("authToken")
        .and_then(Value::as_str)
        .expect("auth token")
        .to_owned();
    assert_eq!(auth_token, session_token, "the session token becomes the bearer token");

    let res =
        actix_test::call_service(&app, post_bearer("/api/auth/verify-token", &auth_token)).await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("valid"), Some(&Value::Bool(true)));
}

#[actix_web::test]
async fn expired_codes_require_a_resend() {
    let h = harness(&["111111", "222222"]);
    let app = actix_test::init_service(full_app(h.state.clone())).await;

    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/login",
            &json!({ "phone": "5555551234", "password": "Test123!" }),
        ),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    let session_token = body
        .get("sessionToken")
        .and_then(Value::as_str)
        .expect("session token")
        .to_owned();

    // The code dies at ten minutes; the session is still alive at thirty.
    h.clock.advance_minutes(11);
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({
                "phone": "5555551234",
                "code": "111111",
                "sessionToken": session_token,
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("verification code expired")
    );

    // A resend issues a fresh code that verifies.
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/resend",
            &json!({ "phone": "5555551234", "sessionToken": session_token }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({
                "phone": "5555551234",
                "code": "222222",
                "sessionToken": session_token,
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn three_wrong_codes_void_the_login() {
    let h = harness(&["111111"]);
    let app = actix_test::init_service(full_app(h.state.clone())).await;

    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/login",
            &json!({ "phone": "5555551234", "password": "Test123!" }),
        ),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    let session_token = body
        .get("sessionToken")
        .and_then(Value::as_str)
        .expect("session token")
        .to_owned();

    for _ in 0..3 {
        let res = actix_test::call_service(
            &app,
            post_json(
                "/api/auth/verify",
                &json!({
                    "phone": "5555551234",
                    "code": "000000",
                    "sessionToken": session_token,
                }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({
                "phone": "5555551234",
                "code": "000000",
                "sessionToken": session_token,
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    // Even the right code is refused now; the user must log in again.
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({
                "phone": "5555551234",
                "code": "111111",
                "sessionToken": session_token,
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn verified_sessions_expire_after_a_day() {
    let h = harness(&["111111"]);
    let app = actix_test::init_service(full_app(h.state.clone())).await;

    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/login",
            &json!({ "phone": "5555551234", "password": "Test123!" }),
        ),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    let token = body
        .get("sessionToken")
        .and_then(Value::as_str)
        .expect("session token")
        .to_owned();
    let res = actix_test::call_service(
        &app,
        post_json(
            "/api/auth/verify",
            &json!({ "phone": "5555551234", "code": "111111", "sessionToken": token }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    h.clock.advance_minutes(25 * 60);
    let res = actix_test::call_service(&app, post_bearer("/api/auth/verify-token", &token)).await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("valid"), Some(&Value::Bool(false)));
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let h = harness(&["111111"]);
    let app = actix_test::init_service(full_app(h.state.clone())).await;

    let res = actix_test::call_service(&app, get("/api/status")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));

    // Errors echo the trace id in the payload too.
    let res = actix_test::call_service(
        &app,
        post_json("/api/auth/login", &json!({ "phone": "5555551234" })),
    )
    .await;
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body.get("traceId").and_then(Value::as_str).map(str::to_owned),
        header
    );
}
