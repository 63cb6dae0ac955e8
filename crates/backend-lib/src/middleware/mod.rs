// ============================
// crates/backend-lib/src/middleware/mod.rs
// ============================
//! Middleware for the tourgate admin gateway.

pub mod guard;

pub use guard::{admin_guard, classify, RouteClass, ADMIN_HOME_PATH, HOME_PATH, LOGIN_PATH};
