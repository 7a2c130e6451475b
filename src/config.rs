//! Configuration types for api-join

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

/// Base URL of the public placeholder REST API
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Remote API settings (base URL, per-request timeout, headers)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the resource paths (`/users`, `/posts`, `/comments`) are joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to each individual GET, not to a whole scenario (default: 10000 ms)
    #[serde(default = "default_timeout", with = "duration_millis_serde")]
    pub timeout: Duration,

    /// Extra headers sent with every request, on top of `Content-Type: application/json`
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

/// Telemetry sink settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Record log entries and API calls (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Attach entry payloads to emitted tracing events (default: false)
    #[serde(default)]
    pub log_payloads: bool,

    /// Maximum retained log entries; the oldest are dropped beyond this (default: 10000)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_payloads: false,
            max_entries: default_max_entries(),
        }
    }
}

/// Main configuration for the scenario runner
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Telemetry settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Check that the configuration can be used to issue requests
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the base URL is not an absolute http(s)
    /// URL or the request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", self.api.base_url, e),
            key: Some("api.base_url".to_string()),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("unsupported URL scheme '{}'", base.scheme()),
                key: Some("api.base_url".to_string()),
            });
        }

        if self.api.timeout.is_zero() {
            return Err(Error::Config {
                message: "request timeout must be greater than zero".to_string(),
                key: Some("api.timeout".to_string()),
            });
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_millis(10_000)
}

fn default_user_agent() -> String {
    concat!("api-join/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    10_000
}

// Durations are written as integer milliseconds
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
