//! Configuration module for the account service.

use serde::Deserialize;
use std::path::Path;

use crate::auth::{decode_secret, MAX_TOKEN_TTL_SECS};
use crate::{AccountError, Result};

/// Environment variable overriding `token.secret`.
pub const ENV_JWT_SECRET: &str = "ACCOUNT_JWT_SECRET";
/// Environment variable overriding `database.url`.
pub const ENV_DATABASE_URL: &str = "ACCOUNT_DATABASE_URL";
/// Environment variable overriding `server.port`.
pub const ENV_SERVER_PORT: &str = "ACCOUNT_SERVER_PORT";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    #[serde(default = "default_db_url")]
    pub url: String,
}

fn default_db_url() -> String {
    "sqlite://data/accounts.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

/// Session token configuration.
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
    /// Base64-encoded HMAC signing secret (must be set).
    #[serde(default)]
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub expiry_secs: u64,
    /// Name of the cookie carrying the token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_token_expiry() -> u64 {
    86400 // 24 hours
}

fn default_cookie_name() -> String {
    "jwt_token".to_string()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiry_secs: default_token_expiry(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[redacted]")
            .field("expiry_secs", &self.expiry_secs)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

/// Password hashing cost configuration.
///
/// The cost is fixed for a deployment; it is never chosen per user.
#[derive(Debug, Clone, Deserialize)]
pub struct HashingConfig {
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    /// Argon2 time cost (iterations).
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Argon2 parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_memory_kib() -> u32 {
    65536 // 64 MB
}

fn default_iterations() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/account-service.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// HTTP layer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session token configuration.
    #[serde(default)]
    pub token: TokenConfig,
    /// Password hashing configuration.
    #[serde(default)]
    pub hashing: HashingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP layer configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AccountError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AccountError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ACCOUNT_JWT_SECRET`: base64 signing secret
    /// - `ACCOUNT_DATABASE_URL`: database URL
    /// - `ACCOUNT_SERVER_PORT`: listen port
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(secret) = non_empty_env(ENV_JWT_SECRET) {
            self.token.secret = secret;
        }
        if let Some(url) = non_empty_env(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(port) = non_empty_env(ENV_SERVER_PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid {}", ENV_SERVER_PORT),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the token secret is missing or not valid base64
    /// - the token lifetime is zero or longer than 30 days
    pub fn validate(&self) -> Result<()> {
        if self.token.secret.trim().is_empty() {
            return Err(AccountError::Config(format!(
                "token.secret is not set. Set it in config.toml or via {ENV_JWT_SECRET}."
            )));
        }
        decode_secret(&self.token.secret)
            .map_err(|e| AccountError::Config(format!("token.secret: {e}")))?;
        if self.token.expiry_secs == 0 {
            return Err(AccountError::Config(
                "token.expiry_secs must be greater than zero".to_string(),
            ));
        }
        if self.token.expiry_secs > MAX_TOKEN_TTL_SECS {
            return Err(AccountError::Config(format!(
                "token.expiry_secs must be at most {MAX_TOKEN_TTL_SECS}"
            )));
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
