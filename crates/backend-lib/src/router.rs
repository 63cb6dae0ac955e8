// ============================
// crates/backend-lib/src/router.rs
// ============================
//! Route table and middleware wiring.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, pages};
use crate::middleware::admin_guard;
use crate::AppState;

/// Create the application router.
///
/// The guard is layered over the whole router (including the fallback), so
/// unrouted `/admin/*` paths still go through authentication before they
/// can 404.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/healthz", get(pages::health))
        .route("/admin", get(pages::dashboard))
        .route("/admin/dashboard", get(pages::dashboard))
        .route("/admin/session", get(auth::session_info))
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", post(auth::logout))
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
