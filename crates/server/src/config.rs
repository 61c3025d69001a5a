//! Kiosk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIOSK_DATABASE_URL` - `SQLite` connection string (e.g., `sqlite://kiosk.db`)
//! - `KIOSK_BASE_URL` - Public URL phones reach the kiosk at (printed into QR upload links)
//!
//! ## Optional
//! - `KIOSK_HOST` - Bind address (default: 0.0.0.0; phones on the store LAN
//!   must be able to reach the server)
//! - `KIOSK_PORT` - Listen port (default: 8000)
//! - `KIOSK_UPLOAD_DIR` - Directory for uploaded photo files (default: ./uploads)
//! - `KIOSK_STATIC_DIR` - Prebuilt SPA directory; when set, unmatched routes
//!   fall back to its `index.html`
//! - `KIOSK_MAX_UPLOAD_BYTES` - Multipart body limit (default: 52428800)
//! - `CORS_ORIGINS` - Comma-separated allowed origins, or `*` (default: `*`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default multipart body limit: 50 MiB covers a burst of phone photos.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`). The deployment default; the kiosk runs on a store LAN.
    Any,
    /// An explicit origin list.
    List(Vec<String>),
}

/// Kiosk application configuration.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL phones use to reach the kiosk (no trailing slash)
    pub base_url: String,
    /// Directory where uploaded photo files are stored
    pub upload_dir: PathBuf,
    /// Prebuilt SPA directory to serve, if any
    pub static_dir: Option<PathBuf>,
    /// Multipart request body limit in bytes
    pub max_upload_bytes: usize,
    /// Allowed CORS origins
    pub cors: CorsOrigins,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

impl KioskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("KIOSK_DATABASE_URL")?;
        let host = get_env_or_default("KIOSK_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("KIOSK_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_PORT".to_owned(), e.to_string()))?;
        let base_url = normalize_base_url(&get_required_env("KIOSK_BASE_URL")?);

        let upload_dir = PathBuf::from(get_env_or_default("KIOSK_UPLOAD_DIR", "uploads"));
        let static_dir = get_optional_env("KIOSK_STATIC_DIR").map(PathBuf::from);

        let max_upload_bytes = get_env_or_default(
            "KIOSK_MAX_UPLOAD_BYTES",
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )
        .parse::<usize>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("KIOSK_MAX_UPLOAD_BYTES".to_owned(), e.to_string())
        })?;

        let cors = parse_cors_origins(&get_env_or_default("CORS_ORIGINS", "*"));

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_owned(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            upload_dir,
            static_dir,
            max_upload_bytes,
            cors,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Absolute URL for a server path like `/upload/{id}`.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<String, ConfigError> {
    // Try primary key first (KIOSK_DATABASE_URL)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(value);
    }
    // Fallback to generic DATABASE_URL
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(value);
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Strip trailing slashes so joined paths never double up.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

/// Parse the `CORS_ORIGINS` value: `*` (or empty) means any origin.
fn parse_cors_origins(value: &str) -> CorsOrigins {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "*" {
        return CorsOrigins::Any;
    }

    let origins: Vec<String> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_owned())
        .collect();

    if origins.is_empty() {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}
