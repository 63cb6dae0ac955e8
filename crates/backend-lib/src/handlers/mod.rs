// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! Request handlers.

pub mod auth;
pub mod pages;
