//! Checkout configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Base URL of the catalog service
//!
//! ## Optional
//! - `CATALOG_BEARER_TOKEN` - Opaque bearer credential attached to
//!   catalog requests; the checkout core never inspects it
//! - `CATALOG_TIMEOUT_SECS` - Request timeout in seconds (default: 10)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog service configuration.
///
/// Implements `Debug` manually to redact the bearer credential.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub base_url: String,
    /// Opaque bearer credential, attached verbatim when present.
    pub bearer_token: Option<SecretString>,
    /// Request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Create a configuration for a given base URL with defaults.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: strip_trailing_slash(base_url.into()),
            bearer_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = strip_trailing_slash(get_required_env("CATALOG_BASE_URL")?);
        let bearer_token = get_optional_env("CATALOG_BEARER_TOKEN").map(SecretString::from);
        let timeout_secs = get_env_or_default(
            "CATALOG_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            bearer_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn strip_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
