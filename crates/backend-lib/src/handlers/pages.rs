// ============================
// crates/backend-lib/src/handlers/pages.rs
// ============================
//! Page placeholders and the liveness probe.
//!
//! The public site and the admin CRUD screens are rendered by the
//! front-end against a separate REST API; these handlers exist so the
//! gate has real paths to protect.
use axum::{response::Html, Extension, Json};
use serde_json::{json, Value};

use crate::auth::Session;

/// GET / — public home
pub async fn home() -> Html<&'static str> {
    Html("<!doctype html><title>Tours</title><h1>Tours &amp; Activities</h1>")
}

/// GET /healthz — liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /admin, /admin/dashboard — protected landing page.
///
/// Receives the session the guard resolved for this request; if this
/// handler runs at all, a valid admin session exists.
pub async fn dashboard(Extension(session): Extension<Session>) -> Json<Value> {
    Json(json!({
        "page": "dashboard",
        "subject": session.subject,
        "expires_at": session.expires_at,
    }))
}
