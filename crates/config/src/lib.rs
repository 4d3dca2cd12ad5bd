//! Configuration loading, validation, and management for QUADRAX•ML.
//!
//! Loads configuration from `~/.quadrax/config.toml` with environment
//! variable overrides. Validates all settings at startup. Values are read
//! once and stay fixed for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.quadrax/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the text-generation backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completion API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Fixed model identifier used for every completion
    #[serde(default = "default_model")]
    pub model: String,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// External identity service
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Operator log configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("gateway", &self.gateway)
            .field("identity", &self.identity)
            .field("logging", &self.logging)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Where bearer credentials are validated.
///
/// With `url` set, tokens are checked against the remote identity
/// service. Otherwise only the static `tokens` list is accepted.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// User-info endpoint of the identity service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Project key sent as the `apikey` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Pre-shared bearer tokens for local deployments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level name: error, warn, info or debug
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily log files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Production mode appends every entry to the daily file
    #[serde(default)]
    pub production: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            production: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.quadrax/config.toml).
    ///
    /// Environment variables are applied on top, see [`AppConfig::apply_env`].
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// - `QUADRAX_API_KEY`, then `OPENAI_API_KEY` (only if no key in file)
    /// - `QUADRAX_API_URL`, `QUADRAX_MODEL`
    /// - `QUADRAX_LOG_LEVEL`, `QUADRAX_LOG_DIR`
    /// - `QUADRAX_ENV=production` turns on the file sink
    /// - `QUADRAX_IDENTITY_URL`, `QUADRAX_IDENTITY_KEY`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("QUADRAX_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }
        if let Some(url) = lookup("QUADRAX_API_URL") {
            self.api_url = url;
        }
        if let Some(model) = lookup("QUADRAX_MODEL") {
            self.model = model;
        }
        if let Some(level) = lookup("QUADRAX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("QUADRAX_LOG_DIR") {
            self.logging.dir = PathBuf::from(dir);
        }
        if let Some(env) = lookup("QUADRAX_ENV") {
            self.logging.production = env.trim().eq_ignore_ascii_case("production");
        }
        if let Some(url) = lookup("QUADRAX_IDENTITY_URL") {
            self.identity.url = Some(url);
        }
        if let Some(key) = lookup("QUADRAX_IDENTITY_KEY") {
            self.identity.api_key = Some(key);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".quadrax")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be non-zero".into(),
            ));
        }

        if !is_http_url(&self.api_url) {
            return Err(ConfigError::ValidationError(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        if let Some(url) = &self.identity.url {
            if !is_http_url(url) {
                return Err(ConfigError::ValidationError(format!(
                    "identity.url must be an http(s) URL, got '{url}'"
                )));
            }
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            gateway: GatewayConfig::default(),
            identity: IdentityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
