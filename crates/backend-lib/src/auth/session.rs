// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Resolved session view and the role claim.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authorization role carried by a session token.
///
/// A closed enum rather than a free-form string: every authorization
/// decision matches on a variant, and the only place a string appears is
/// the wire claim parsed in [`Role::from_claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    /// Wire form of the role for the token's claim set
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }

    /// Parse a wire claim back into a role. Unknown claims yield `None`:
    /// the holder is authenticated but carries no recognized privilege.
    pub fn from_claim(claim: &str) -> Option<Role> {
        match claim {
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A request's resolved session, produced by
/// [`SessionIssuer::resolve`](crate::auth::SessionIssuer::resolve) and handed
/// to protected handlers through request extensions. Never read from global
/// state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Identity id the token was issued for
    pub subject: String,
    /// Recognized role, if the token's claim is in the closed set
    pub role: Option<Role>,
    /// Absolute expiry of the token
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session authorizes admin access
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin))
    }
}

/// Authentication failures the gate distinguishes.
///
/// `MissingToken` and `InvalidToken` are indistinguishable to the client,
/// but expiry is kept separate so logs can tell a stale session apart from
/// a tampering attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("no session token present")]
    MissingToken,

    #[error("session token signature invalid")]
    InvalidToken,

    #[error("session token expired")]
    ExpiredToken,

    #[error("session role lacks required privilege")]
    InsufficientRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_roundtrip() {
        assert_eq!(Role::from_claim(Role::Admin.as_claim()), Some(Role::Admin));
    }

    #[test]
    fn unknown_claims_carry_no_privilege() {
        assert_eq!(Role::from_claim("editor"), None);
        assert_eq!(Role::from_claim(""), None);
        assert_eq!(Role::from_claim("Admin"), None);
    }

    #[test]
    fn session_is_admin_only_for_admin_role() {
        let session = Session {
            subject: "admin".to_string(),
            role: Some(Role::Admin),
            expires_at: Utc::now(),
        };
        assert!(session.is_admin());

        let session = Session {
            subject: "admin".to_string(),
            role: None,
            expires_at: Utc::now(),
        };
        assert!(!session.is_admin());
    }
}
