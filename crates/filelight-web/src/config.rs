use std::net::SocketAddr;
use std::path::PathBuf;

use filelight_core::Settings;
use serde::Deserialize;

use crate::auth::password;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub browse: Settings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    /// Argon2 PHC hash of the admin password. A plaintext value is hashed at
    /// startup; an empty one disables description editing.
    #[serde(default)]
    pub admin_password: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_login_rpm")]
    pub login_requests_per_minute: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            browse: Settings::default(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            admin_password: String::new(),
            jwt_ttl_hours: default_jwt_ttl_hours(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { login_requests_per_minute: default_login_rpm() }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9090))
}

fn default_jwt_ttl_hours() -> u64 { 12 }
fn default_login_rpm() -> u32 { 5 }

const WEAK_SECRETS: &[&str] = &[
    "change-me-to-a-random-secret",
    "secret",
    "password",
    "jwt-secret",
];

impl ServerConfig {
    /// Returns `true` if an admin password is configured.
    pub fn admin_enabled(&self) -> bool {
        !self.auth.admin_password.is_empty()
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    /// Loads `FILELIGHT_CONFIG` (if set) and applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let contents = match std::env::var("FILELIGHT_CONFIG") {
            Ok(path) => Some(std::fs::read_to_string(PathBuf::from(path))?),
            Err(_) => None,
        };
        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Builds the config from optional TOML text and an environment lookup.
    pub fn from_sources(
        contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config: ServerConfig = match contents {
            Some(text) => toml::from_str(text)?,
            None => ServerConfig::default(),
        };

        if let Some(root) = env("FILELIGHT_ROOT") {
            config.browse.root = PathBuf::from(root);
        }
        if let Some(addr) = env("FILELIGHT_BIND_ADDR") {
            config.bind_addr = addr.parse()?;
        }
        if let Some(secret) = env("FILELIGHT_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(admin_password) = env("FILELIGHT_ADMIN_PASSWORD") {
            config.auth.admin_password = admin_password;
        }
        if let Some(cert) = env("FILELIGHT_TLS_CERT") {
            config.tls.cert_path = Some(cert);
        }
        if let Some(key) = env("FILELIGHT_TLS_KEY") {
            config.tls.key_path = Some(key);
        }

        if config.auth.jwt_secret.is_empty() {
            config.auth.jwt_secret = uuid::Uuid::new_v4().to_string();
            tracing::warn!(
                "No JWT secret configured. Generated random secret (will change on restart)."
            );
        }

        config.prepare_admin_password()?;

        if config.admin_enabled() {
            if WEAK_SECRETS.iter().any(|&w| config.auth.jwt_secret == w) {
                anyhow::bail!(
                    "JWT secret matches a known weak/placeholder value. \
                     Set a strong random secret via FILELIGHT_JWT_SECRET environment variable."
                );
            }
            if config.auth.jwt_secret.len() < 32 {
                tracing::warn!(
                    "JWT secret is shorter than 32 characters. \
                     Consider using a stronger secret via FILELIGHT_JWT_SECRET."
                );
            }
        }

        Ok(config)
    }

    fn prepare_admin_password(&mut self) -> anyhow::Result<()> {
        let configured = self.auth.admin_password.trim().to_string();
        if configured.is_empty() {
            self.auth.admin_password.clear();
            tracing::warn!("No admin password configured. Description editing is disabled.");
            return Ok(());
        }
        self.auth.admin_password = if password::is_password_hash(&configured) {
            configured
        } else {
            tracing::warn!(
                "Admin password is stored in plaintext. \
                 Replace it with the output of `hash_password`."
            );
            password::hash_password(&configured)?
        };
        Ok(())
    }
}
