//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FURNISH_API_BASE_URL` - Storefront API origin (default: `http://127.0.0.1:3000`)
//! - `FURNISH_DATA_DIR` - Where store snapshots are written
//!   (default: `<platform data dir>/furnish`, falling back to `./.furnish`)
//! - `FURNISH_CACHE_TTL_SECS` - CMS staleness window in seconds (default: 300)
//! - `FURNISH_CACHE_CAPACITY` - Maximum cached CMS responses (default: 1000)
//! - `FURNISH_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `FURNISH_LOG_FORMAT` - `text` or `json` (default: `text`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// CMS API client configuration
    pub cms: CmsConfig,
    /// Directory for persisted store snapshots
    pub data_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

/// CMS API client configuration.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// API origin; always ends with `/` so endpoint paths join beneath it
    pub base_url: Url,
    /// How long a cached response is served before it is refetched
    pub stale_time: Duration,
    /// Maximum number of cached responses
    pub cache_capacity: u64,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let cms = CmsConfig {
            base_url: parse_base_url(
                "FURNISH_API_BASE_URL",
                &env.get_or_default("FURNISH_API_BASE_URL", DEFAULT_API_BASE_URL),
            )?,
            stale_time: Duration::from_secs(
                env.parse_or("FURNISH_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            ),
            cache_capacity: env.parse_or("FURNISH_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
            request_timeout: Duration::from_secs(
                env.parse_or("FURNISH_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            ),
        };

        let data_dir = env
            .get_optional("FURNISH_DATA_DIR")
            .map_or_else(default_data_dir, PathBuf::from);

        let log_format = match env.get_optional("FURNISH_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "FURNISH_LOG_FORMAT".to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        Ok(Self {
            cms,
            data_dir,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable. Blank values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Parse an http(s) base URL and make sure it ends with `/`.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".furnish"), |dir| dir.join("furnish"))
}
