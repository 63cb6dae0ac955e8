// ============================
// crates/backend-lib/src/auth/credentials.rs
// ============================
//! Credential verification against the configured operator identity.
use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use super::session::Role;
use crate::config::AuthSettings;

/// Subject id embedded in tokens issued for the operator
const ADMIN_SUBJECT: &str = "admin";

/// A submitted email/password pair.
///
/// Lives only for the duration of one verification call. The password is
/// wiped on drop and never appears in `Debug` output or logs.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Minimal authenticated-user record produced by a successful verification.
/// Ephemeral: constructed here, consumed by the session issuer, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

/// Verifies submitted credentials against the single configured operator
/// identity. Pure function of input and configuration, no I/O.
#[derive(Clone)]
pub struct CredentialVerifier {
    admin_email: Option<String>,
    admin_password: Option<String>,
}

impl CredentialVerifier {
    /// Build a verifier from the auth settings.
    ///
    /// Empty values count as unset: an unconfigured deployment must reject
    /// every login rather than accept an empty pair.
    pub fn from_settings(auth: &AuthSettings) -> Self {
        Self {
            admin_email: auth.admin_email.clone().filter(|v| !v.is_empty()),
            admin_password: auth.admin_password.clone().filter(|v| !v.is_empty()),
        }
    }

    /// Verify a submitted pair against the configured identity.
    ///
    /// Returns the operator [`Identity`] on an exact match of both fields,
    /// `None` on any mismatch. There is no partial-match feedback: an
    /// unknown email and a wrong password are indistinguishable to the
    /// caller. Both comparisons are constant-time.
    pub fn verify(&self, credentials: &Credentials) -> Option<Identity> {
        let (Some(email), Some(password)) = (&self.admin_email, &self.admin_password) else {
            return None;
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return None;
        }

        let email_ok = constant_time_eq(&credentials.email, email);
        let password_ok = constant_time_eq(&credentials.password, password);
        if !(email_ok && password_ok) {
            return None;
        }

        Some(Identity {
            id: ADMIN_SUBJECT.to_string(),
            display_name: "Administrator".to_string(),
            email: email.clone(),
            role: Role::Admin,
        })
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
