// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod credentials;
pub mod session;
pub mod token;

pub use credentials::{CredentialVerifier, Credentials, Identity};
pub use session::{AuthError, Role, Session};
pub use token::{IssuedToken, SessionIssuer};
