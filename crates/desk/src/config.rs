//! Desk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CRM_API_BASE_URL` - Customer service base URL (default: `http://localhost:3000`)
//! - `CRM_PAGE_SIZE` - Customers per page (default: 5)
//! - `CRM_SEARCH_DEBOUNCE_MS` - Quiet interval for search input (default: 300)
//! - `CRM_HTTP_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `CRM_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::time::Duration;

use thiserror::Error;
use url::Url;

use clientele_core::{DEFAULT_PAGE_SIZE, SEARCH_DEBOUNCE};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Desk application configuration.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Base URL of the customer REST service
    pub api_base_url: Url,
    /// Customers per page
    pub page_size: usize,
    /// Quiet interval before a search query is applied
    pub search_debounce: Duration,
    /// HTTP request timeout
    pub http_timeout: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl DeskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_base_url = parse_base_url(&env_or("CRM_API_BASE_URL", DEFAULT_BASE_URL))?;
        let page_size = parse_positive(
            "CRM_PAGE_SIZE",
            &env_or("CRM_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string()),
        )?;
        let page_size = usize::try_from(page_size)
            .map_err(|e| ConfigError::InvalidEnvVar("CRM_PAGE_SIZE".to_string(), e.to_string()))?;
        let debounce_ms = env_or(
            "CRM_SEARCH_DEBOUNCE_MS",
            &SEARCH_DEBOUNCE.as_millis().to_string(),
        )
            .trim()
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CRM_SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
            })?;
        let timeout_secs = parse_positive(
            "CRM_HTTP_TIMEOUT_SECS",
            &env_or("CRM_HTTP_TIMEOUT_SECS", "30"),
        )?;
        let log_format = match env_or("CRM_LOG_FORMAT", "text").to_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "CRM_LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        let sentry_sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api_base_url,
            page_size,
            search_debounce: Duration::from_millis(debounce_ms),
            http_timeout: Duration::from_secs(timeout_secs),
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the service base URL; only http and https are accepted.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("CRM_API_BASE_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "CRM_API_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "CRM_API_BASE_URL".to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }

    Ok(url)
}

/// Parse a strictly positive integer.
fn parse_positive(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<DeskConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        DeskConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.search_debounce, SEARCH_DEBOUNCE);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CRM_API_BASE_URL", "https://crm.example.com/api/"),
            ("CRM_PAGE_SIZE", "20"),
            ("CRM_SEARCH_DEBOUNCE_MS", "0"),
            ("CRM_HTTP_TIMEOUT_SECS", "5"),
            ("CRM_LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@o0.ingest.sentry.io/0"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url.path(), "/api/");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.search_debounce, Duration::ZERO);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = load(&[("CRM_PAGE_SIZE", "0")]).unwrap_err();
        assert!(err.to_string().contains("CRM_PAGE_SIZE"));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(load(&[("CRM_HTTP_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("CRM_SEARCH_DEBOUNCE_MS", "-1")]).is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(load(&[("CRM_API_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("CRM_API_BASE_URL", "ftp://files.example.com")]).is_err());
        assert!(load(&[("CRM_API_BASE_URL", "mailto:crm@example.com")]).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        assert!(load(&[("CRM_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_empty_sentry_dsn_is_disabled() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
