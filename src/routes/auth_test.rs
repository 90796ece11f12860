use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::test_app_state;

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_and_lax() {
    let cookie = session_cookie("tok".into(), true);
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn expired_session_cookie_clears_value() {
    let cookie = expired_session_cookie(false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.secure(), Some(false));
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn email_auth_errors_map_to_statuses() {
    assert_eq!(email_auth_error_to_status(&EmailAuthError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::InvalidCode), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::VerificationFailed), StatusCode::UNAUTHORIZED);
    assert_eq!(email_auth_error_to_status(&EmailAuthError::EmailDelivery("x".into())), StatusCode::BAD_GATEWAY);
    assert_eq!(
        email_auth_error_to_status(&EmailAuthError::Db(sqlx::Error::RowNotFound)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// =============================================================================
// handlers (no live DB: every case below is rejected before a query runs)
// =============================================================================

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_cookie_is_unauthorized() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(Request::post("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_code_rejects_invalid_email() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(json_post("/api/auth/email/request-code", &serde_json::json!({ "email": "not-an-email" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_code_rejects_malformed_code() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(json_post(
            "/api/auth/email/verify-code",
            &serde_json::json!({ "email": "user@example.com", "code": "12" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn healthz_is_ok() {
    let app = api_routes(test_app_state());
    let resp = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
