// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Environment prefix for layered settings, e.g. `TOURGATE_AUTH__SESSION_TTL_SECS`.
const ENV_PREFIX: &str = "TOURGATE_";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server settings
    pub server: ServerSettings,
    /// Auth gate settings
    pub auth: AuthSettings,
    /// Log level
    pub log_level: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Auth gate settings
///
/// The three secrets are optional at the type level so that an undeployed
/// value is representable as "unset" rather than as an empty string a login
/// attempt could trivially satisfy. The credential verifier treats unset as
/// reject-everything; a missing `session_secret` fails at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Operator login email
    pub admin_email: Option<String>,
    /// Operator login password
    pub admin_password: Option<String>,
    /// HMAC secret for session token signing
    pub session_secret: Option<String>,
    /// Session lifetime in seconds (fixed from issuance, not sliding)
    pub session_ttl_secs: u64,
    /// Name of the session cookie
    pub cookie_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            auth: AuthSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            admin_email: None,
            admin_password: None,
            session_secret: None,
            session_ttl_secs: 60 * 60 * 2, // 2 hours
            cookie_name: "tourgate_session".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `config/default.toml` merged with the environment
    pub fn load() -> Result<Self> {
        Self::load_from("config/default.toml")
    }

    /// Load settings from an explicit config file merged with the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(settings.with_env_overrides().normalized())
    }

    /// Apply the bare environment variable names used by deployments
    /// (`ADMIN_EMAIL`, `ADMIN_PASSWORD`, `SESSION_SECRET`) on top of the
    /// layered configuration.
    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("ADMIN_EMAIL") {
            self.auth.admin_email = Some(v);
        }
        if let Ok(v) = std::env::var("ADMIN_PASSWORD") {
            self.auth.admin_password = Some(v);
        }
        if let Ok(v) = std::env::var("SESSION_SECRET") {
            self.auth.session_secret = Some(v);
        }
        self
    }

    /// Collapse empty-string secrets to unset
    pub fn normalized(mut self) -> Self {
        self.auth.admin_email = non_empty(self.auth.admin_email);
        self.auth.admin_password = non_empty(self.auth.admin_password);
        self.auth.session_secret = non_empty(self.auth.session_secret);
        self
    }

    /// Socket address to bind the server to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.auth.session_ttl_secs, 7200);
        assert_eq!(settings.auth.cookie_name, "tourgate_session");
        assert!(settings.auth.admin_email.is_none());
        assert!(settings.auth.session_secret.is_none());
    }

    #[test]
    fn empty_secrets_are_unset() {
        let mut settings = Settings::default();
        settings.auth.admin_email = Some(String::new());
        settings.auth.admin_password = Some("hunter2hunter2!".to_string());
        settings.auth.session_secret = Some(String::new());

        let settings = settings.normalized();
        assert!(settings.auth.admin_email.is_none());
        assert_eq!(
            settings.auth.admin_password.as_deref(),
            Some("hunter2hunter2!")
        );
        assert!(settings.auth.session_secret.is_none());
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let mut settings = Settings::default();
        settings.server.port = 9000;
        assert_eq!(
            settings.bind_addr().unwrap(),
            "127.0.0.1:9000".parse().unwrap()
        );
    }
}
