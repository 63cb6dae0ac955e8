// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the tourgate admin gateway: the auth gate (credential
//! verification, stateless session tokens, route guard) for a tourism
//! operator's back-office.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

use std::sync::Arc;

use anyhow::Result;

use crate::auth::{CredentialVerifier, SessionIssuer};
use crate::config::Settings;

/// Application state shared across all handlers.
///
/// Everything here is immutable after startup; per-request auth decisions
/// are pure functions of the request and the wall clock, so requests need
/// no coordination.
pub struct AppState {
    /// Settings manager
    pub settings: Arc<Settings>,
    /// Credential verifier for the configured operator identity
    pub verifier: CredentialVerifier,
    /// Session token issuer
    pub issuer: SessionIssuer,
}

impl AppState {
    /// Create the application state.
    ///
    /// Fails when the session signing secret is not configured; unset
    /// operator credentials are tolerated (the verifier then rejects every
    /// login) so the public site can still serve.
    pub fn new(settings: Settings) -> Result<Self> {
        let settings = settings.normalized();
        let verifier = CredentialVerifier::from_settings(&settings.auth);
        let issuer = SessionIssuer::from_settings(&settings.auth)?;
        if settings.auth.admin_email.is_none() || settings.auth.admin_password.is_none() {
            tracing::warn!("operator credentials not configured; all logins will be rejected");
        }
        Ok(Self {
            settings: Arc::new(settings),
            verifier,
            issuer,
        })
    }
}
