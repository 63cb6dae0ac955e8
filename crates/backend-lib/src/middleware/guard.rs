// ============================
// crates/backend-lib/src/middleware/guard.rs
// ============================
//! Route guard for the protected `/admin` prefix.
//!
//! Runs ahead of routing for every request. Public paths pass through
//! without touching the session at all; protected paths must present a
//! valid, unexpired admin token or get redirected. The decision is made
//! fresh on every request from the cookie and the wall clock alone.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::AuthError;
use crate::AppState;

/// Prefix under which every path (bar the login page) requires an admin session
pub const ADMIN_PREFIX: &str = "/admin";
/// Login page, exempt from the guard so the redirect cannot loop
pub const LOGIN_PATH: &str = "/admin/login";
/// Landing page for authenticated operators
pub const ADMIN_HOME_PATH: &str = "/admin";
/// Public home, target for authenticated-but-unprivileged sessions
pub const HOME_PATH: &str = "/";

/// Guard-relevant partition of the path space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Classify a request path.
///
/// Prefix matching is segment-aware: `/admin` and `/admin/anything` are
/// protected, `/administrator` is not. Exactly `/admin/login` stays public.
pub fn classify(path: &str) -> RouteClass {
    let under_admin = path == ADMIN_PREFIX || path.starts_with("/admin/");
    if under_admin && path != LOGIN_PATH {
        RouteClass::Protected
    } else {
        RouteClass::Public
    }
}

/// Admin route guard.
///
/// Per-request state machine: public paths are allowed unconditionally;
/// protected paths terminate in one of allow, redirect-to-login (missing,
/// invalid or expired token, with the original URL as `callbackUrl`), or
/// redirect-to-home (authenticated but not an admin — re-login would not
/// change the outcome). On allow, the resolved session is inserted into
/// request extensions for the handler.
pub async fn admin_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if classify(&path) == RouteClass::Public {
        return next.run(request).await;
    }

    let original = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let resolved = session_cookie(request.headers(), state.issuer.cookie_name())
        .ok_or(AuthError::MissingToken)
        .and_then(|token| state.issuer.resolve(&token));

    match resolved {
        Ok(session) if session.is_admin() => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Ok(session) => {
            tracing::warn!(subject = %session.subject, path = %path, "session lacks admin role");
            redirect(HOME_PATH)
        }
        Err(err) => {
            // Expiry is routine; a bad signature is security-relevant
            match err {
                AuthError::MissingToken => {
                    tracing::debug!(path = %path, "no session token on protected path");
                }
                AuthError::ExpiredToken => {
                    tracing::info!(path = %path, "session token expired");
                }
                _ => {
                    tracing::warn!(path = %path, "session token rejected");
                }
            }
            redirect(&login_redirect_target(&original))
        }
    }
}

/// Login redirect target carrying the original URL as a callback parameter
pub fn login_redirect_target(original: &str) -> String {
    format!("{}?callbackUrl={}", LOGIN_PATH, urlencoding::encode(original))
}

/// Extract the named session cookie from the request headers
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let part = pair.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// 302 redirect to the given location
fn redirect(location: &str) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    let value =
        HeaderValue::try_from(location).unwrap_or_else(|_| HeaderValue::from_static(HOME_PATH));
    response.headers_mut().insert(header::LOCATION, value);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_paths_are_protected() {
        assert_eq!(classify("/admin"), RouteClass::Protected);
        assert_eq!(classify("/admin/dashboard"), RouteClass::Protected);
        assert_eq!(classify("/admin/tours/3/edit"), RouteClass::Protected);
        assert_eq!(classify("/admin/logout"), RouteClass::Protected);
    }

    #[test]
    fn login_page_is_public() {
        assert_eq!(classify("/admin/login"), RouteClass::Public);
    }

    #[test]
    fn everything_else_is_public() {
        assert_eq!(classify("/"), RouteClass::Public);
        assert_eq!(classify("/tours"), RouteClass::Public);
        assert_eq!(classify("/blog/some-post"), RouteClass::Public);
        // prefix matching is segment-aware
        assert_eq!(classify("/administrator"), RouteClass::Public);
        assert_eq!(classify("/admins"), RouteClass::Public);
    }

    #[test]
    fn login_redirect_encodes_original_url() {
        assert_eq!(
            login_redirect_target("/admin/dashboard"),
            "/admin/login?callbackUrl=%2Fadmin%2Fdashboard"
        );
        assert_eq!(
            login_redirect_target("/admin/tours?page=2"),
            "/admin/login?callbackUrl=%2Fadmin%2Ftours%3Fpage%3D2"
        );
    }

    #[test]
    fn cookie_extraction_picks_the_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; tourgate_session=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            session_cookie(&headers, "tourgate_session").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(session_cookie(&headers, "other_cookie"), None);

        let empty = HeaderMap::new();
        assert_eq!(session_cookie(&empty, "tourgate_session"), None);
    }
}
