//! Auth routes: email access codes, session cookie, current user.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::email_auth::{self, EmailAuthError};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn email_auth_error_to_status(err: &EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode => StatusCode::BAD_REQUEST,
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
        EmailAuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &EmailAuthError) -> Response {
    let status = email_auth_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "email auth failed");
    }
    (status, Json(serde_json::json!({ "ok": false, "error": err.to_string() }))).into_response()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, user_id = auth.user.id, "session delete failed");
    }
    let jar = CookieJar::new().add(expired_session_cookie(state.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RequestCodeBody {
    email: String,
}

/// `POST /api/auth/email/request-code`: issue a code and email it.
///
/// The plaintext code is echoed back only when `ECHO_LOGIN_CODES` is on.
pub async fn request_email_code(State(state): State<AppState>, Json(body): Json<RequestCodeBody>) -> Response {
    if email_auth::normalize_email(&body.email).is_none() {
        return error_response(&EmailAuthError::InvalidEmail);
    }

    let (email, code) = match email_auth::request_access_code(&state.pool, &body.email).await {
        Ok(issued) => issued,
        Err(e) => return error_response(&e),
    };

    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = email_auth::send_access_code_email(mailer.as_ref(), &email, &code).await {
                if !state.echo_login_codes {
                    return error_response(&e);
                }
                tracing::warn!(error = %e, "access code email failed; code echoed instead");
            }
        }
        None if !state.echo_login_codes => {
            tracing::warn!(%email, "mail not configured; access code was not delivered");
        }
        None => {}
    }

    let echoed = state.echo_login_codes.then_some(code);
    Json(serde_json::json!({ "ok": true, "code": echoed })).into_response()
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    email: String,
    code: String,
}

/// `POST /api/auth/email/verify-code`: consume a code, open a session, set cookie.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Response {
    if email_auth::normalize_email(&body.email).is_none() {
        return error_response(&EmailAuthError::InvalidEmail);
    }
    if email_auth::normalize_code(&body.code).is_none() {
        return error_response(&EmailAuthError::InvalidCode);
    }

    let user_id = match email_auth::verify_access_code(&state.pool, &body.email, &body.code).await {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, user_id, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    tracing::info!(user_id, "email login succeeded");
    let jar = jar.add(session_cookie(token, state.cookie_secure));
    (jar, Json(serde_json::json!({ "ok": true }))).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
