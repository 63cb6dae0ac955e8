// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Login, logout and session introspection.
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{Credentials, Session};
use crate::error::AppError;
use crate::middleware::{ADMIN_HOME_PATH, LOGIN_PATH};
use crate::AppState;

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Where the client was headed before the guard sent it to login
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: Option<String>,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    /// Where the client should navigate next
    pub redirect: String,
}

/// POST /admin/login
///
/// Verifies the submitted pair and, on success, sets the session cookie and
/// returns the navigation target. Every failure is the same generic 401:
/// the response never says which field was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let credentials = Credentials {
        email: req.email,
        password: req.password,
    };

    let Some(identity) = state.verifier.verify(&credentials) else {
        tracing::warn!("login rejected");
        return Err(AppError::InvalidCredentials);
    };

    let issued = state
        .issuer
        .issue(&identity)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!(subject = %identity.id, "admin login");

    let redirect = req
        .callback_url
        .filter(|url| is_safe_callback(url))
        .unwrap_or_else(|| ADMIN_HOME_PATH.to_string());

    let mut response = Json(LoginResponse {
        ok: true,
        redirect,
    })
    .into_response();
    let cookie = HeaderValue::try_from(issued.cookie)
        .map_err(|_| AppError::Internal("session cookie not header-safe".to_string()))?;
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// POST /admin/logout
///
/// Clears the session cookie and sends the client back to the login page.
/// The token itself stays valid until its expiry; stateless tokens have no
/// server-side revocation.
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let mut response = StatusCode::FOUND.into_response();
    let cookie = HeaderValue::try_from(state.issuer.clear_cookie())
        .map_err(|_| AppError::Internal("session cookie not header-safe".to_string()))?;
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    response
        .headers_mut()
        .insert(header::LOCATION, HeaderValue::from_static(LOGIN_PATH));
    tracing::info!("admin logout");
    Ok(response)
}

/// GET /admin/session — resolved session for the admin UI
pub async fn session_info(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}

/// GET /admin/login — placeholder login page (the real UI lives in the
/// front-end; this keeps the path routable and exempt from the guard)
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><title>Sign in</title>\
         <form method=\"post\" action=\"/admin/login\">\
         <input name=\"email\" type=\"email\" placeholder=\"Email\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <button>Sign in</button></form>",
    )
}

/// Only same-origin absolute paths are honored as login callbacks;
/// anything that could leave the site (`//host`, schemes) is ignored.
fn is_safe_callback(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}
