// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Stateless session tokens: signing, resolution, cookie serialization.
//!
//! The token is the sole source of truth for a session. There is no
//! server-side session table and no revocation list; a fixed expiry from
//! issuance is the only invalidation mechanism. A token is valid if and
//! only if its signature verifies under the current secret and the current
//! time is before its expiry.
use anyhow::{anyhow, Result};
use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::credentials::Identity;
use super::session::{AuthError, Role, Session};
use crate::config::AuthSettings;

/// Claim set embedded in every session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id the token was issued for
    pub sub: String,
    /// Role claim, wire form (see [`Role::as_claim`])
    pub role: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// A freshly minted session token plus its cookie serialization
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded, signed token
    pub token: String,
    /// `Set-Cookie` value carrying the token (HTTP-only)
    pub cookie: String,
}

/// Signs identities into session tokens and resolves inbound tokens back
/// into [`Session`]s. Holds only immutable key material; resolution is a
/// pure function of the token and the wall clock.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    cookie_name: String,
}

impl SessionIssuer {
    /// Create an issuer from a signing secret and session lifetime
    pub fn new(secret: &str, ttl_secs: u64, cookie_name: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
            cookie_name: cookie_name.to_string(),
        }
    }

    /// Build an issuer from the auth settings.
    ///
    /// A missing signing secret is a startup error: the gate must never run
    /// with a guessable default key.
    pub fn from_settings(auth: &AuthSettings) -> Result<Self> {
        let secret = auth
            .session_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("session_secret is not configured"))?;
        Ok(Self::new(secret, auth.session_ttl_secs, &auth.cookie_name))
    }

    /// Mint a signed session token for a verified identity
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.clone(),
            role: identity.role.as_claim().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        let cookie = self.session_cookie(&token);
        Ok(IssuedToken { token, cookie })
    }

    /// Resolve an inbound token into a session.
    ///
    /// Expiry and signature failure are distinct outcomes: both leave the
    /// caller unauthenticated, but only the latter suggests tampering.
    /// Resolution has no side effects; resolving the same token twice
    /// yields the same session.
    pub fn resolve(&self, token: &str) -> Result<Session, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or(AuthError::InvalidToken)?;

        Ok(Session {
            subject: data.claims.sub,
            role: Role::from_claim(&data.claims.role),
            expires_at,
        })
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// `Set-Cookie` value carrying a token
    fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            token,
            self.ttl.num_seconds()
        )
    }

    /// `Set-Cookie` value that deletes the session cookie (logout)
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new("unit-test-secret", 7200, "tourgate_session")
    }

    fn admin_identity() -> Identity {
        Identity {
            id: "admin".to_string(),
            display_name: "Administrator".to_string(),
            email: "ops@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn issued_token_resolves_to_same_subject_and_role() {
        let issuer = issuer();
        let issued = issuer.issue(&admin_identity()).unwrap();

        let session = issuer.resolve(&issued.token).unwrap();
        assert_eq!(session.subject, "admin");
        assert_eq!(session.role, Some(Role::Admin));
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn cookie_carries_token_and_flags() {
        let issuer = issuer();
        let issued = issuer.issue(&admin_identity()).unwrap();
        assert!(issued
            .cookie
            .starts_with(&format!("tourgate_session={}", issued.token)));
        assert!(issued.cookie.contains("HttpOnly"));
        assert!(issued.cookie.contains("Max-Age=7200"));
        assert!(issuer.clear_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let issuer = issuer();
        let issued = issuer.issue(&admin_identity()).unwrap();

        // Flip one character in the payload segment
        let mut parts: Vec<String> = issued.token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert_eq!(issuer.resolve(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_tokens_are_invalid_not_expired() {
        let issuer = issuer();
        assert_eq!(issuer.resolve(""), Err(AuthError::InvalidToken));
        assert_eq!(issuer.resolve("not.a.jwt"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let issued = issuer().issue(&admin_identity()).unwrap();
        let other = SessionIssuer::new("a-different-secret", 7200, "tourgate_session");
        assert_eq!(other.resolve(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let issuer = issuer();
        let now = Utc::now();
        let claims = Claims {
            sub: "admin".to_string(),
            role: Role::Admin.as_claim().to_string(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert_eq!(issuer.resolve(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn unknown_role_claim_resolves_without_privilege() {
        let issuer = issuer();
        let now = Utc::now();
        let claims = Claims {
            sub: "admin".to_string(),
            role: "editor".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        let session = issuer.resolve(&token).unwrap();
        assert_eq!(session.role, None);
        assert!(!session.is_admin());
    }

    #[test]
    fn resolve_is_idempotent() {
        let issuer = issuer();
        let issued = issuer.issue(&admin_identity()).unwrap();

        let first = issuer.resolve(&issued.token);
        let second = issuer.resolve(&issued.token);
        assert!(first.is_ok());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_secret_is_a_startup_error() {
        let auth = crate::config::AuthSettings::default();
        assert!(SessionIssuer::from_settings(&auth).is_err());
    }
}
