//! Process-wide application configuration.
//!
//! `AppConfig` is read from the environment (after loading an optional `.env`
//! file) exactly once, during startup, and is immutable afterwards. Every
//! component that needs a value receives it from the instance returned by
//! [`AppConfig::init`] instead of re-reading the environment per request.

use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Default ceiling on a single media-host call (10 minutes).
pub const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 600;

/// Default ceiling on a multipart request body (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: i64,
    pub media_cloud_name: String,
    pub media_api_key: String,
    pub media_api_secret: String,
    pub media_base_url: String,
    pub media_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

static CONFIG_INSTANCE: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Loads `.env` (if present), reads the environment and stores the result
    /// as the process-wide configuration.
    ///
    /// Calling this more than once returns the instance stored by the first
    /// successful call.
    pub fn init() -> Result<&'static AppConfig, ConfigError> {
        if let Some(existing) = CONFIG_INSTANCE.get() {
            return Ok(existing);
        }

        dotenvy::dotenv().ok();
        let loaded = Self::from_env()?;
        Ok(CONFIG_INSTANCE.get_or_init(|| loaded))
    }

    /// Reads the configuration from the current process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            env: or("APP_ENV", "development"),
            project_name: or("PROJECT_NAME", "course-market"),
            log_level: or("LOG_LEVEL", "api=info,services=info,tower_http=info"),
            log_file: or("LOG_FILE", "api.log"),
            log_to_stdout: or("LOG_TO_STDOUT", "false") == "true",
            database_path: required("DATABASE_PATH")?,
            host: or("HOST", "127.0.0.1"),
            port: parse_or(&lookup, "PORT", 3000)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_duration_minutes: parse_or(&lookup, "JWT_DURATION_MINUTES", 60)?,
            media_cloud_name: required("MEDIA_CLOUD_NAME")?,
            media_api_key: required("MEDIA_API_KEY")?,
            media_api_secret: required("MEDIA_API_SECRET")?,
            media_base_url: or("MEDIA_BASE_URL", "https://api.cloudinary.com/v1_1"),
            media_timeout_secs: parse_or(&lookup, "MEDIA_TIMEOUT_SECS", DEFAULT_MEDIA_TIMEOUT_SECS)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    /// Returns the `host:port` pair the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
