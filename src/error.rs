//! Error types for api-join
//!
//! This module provides the error handling for the library:
//! - [`HttpError`], the single normalized failure shape of the transport primitive
//! - [`Error`], the crate-level error used by configuration, validation and fetching

use thiserror::Error;

/// Result type alias for api-join operations
pub type Result<T> = std::result::Result<T, Error>;

/// `status_text` used when a request exceeds its timeout
pub const STATUS_TEXT_TIMEOUT: &str = "Timeout";

/// `status_text` used for connection, DNS and decode failures
pub const STATUS_TEXT_NETWORK_ERROR: &str = "Network Error";

/// Normalized transport failure
///
/// Every failure mode of a GET request (non-2xx response, timeout, network or
/// decode failure) is reported through this one type. Timeouts and network
/// failures carry a `status_code` of `0`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpError {
    /// Human-readable message, embeds status and reason for HTTP failures
    pub message: String,
    /// HTTP status code, or 0 when no response was received
    pub status_code: u16,
    /// HTTP reason phrase, `"Timeout"` or `"Network Error"`
    pub status_text: String,
    /// Wall-clock time spent on the request in milliseconds
    pub execution_time_ms: f64,
}

impl HttpError {
    /// Failure for a response that arrived with a non-2xx status
    pub fn status(status_code: u16, status_text: impl Into<String>, execution_time_ms: f64) -> Self {
        let status_text = status_text.into();
        Self {
            message: format!("HTTP Error: {} {}", status_code, status_text),
            status_code,
            status_text,
            execution_time_ms,
        }
    }

    /// Failure for a request that did not complete within `timeout_ms`
    pub fn timeout(timeout_ms: u128, execution_time_ms: f64) -> Self {
        Self {
            message: format!("Request timeout after {}ms", timeout_ms),
            status_code: 0,
            status_text: STATUS_TEXT_TIMEOUT.to_string(),
            execution_time_ms,
        }
    }

    /// Failure below HTTP: DNS, connection refused, body read or JSON decode
    pub fn network(detail: impl std::fmt::Display, execution_time_ms: f64) -> Self {
        Self {
            message: format!("Network error: {}", detail),
            status_code: 0,
            status_text: STATUS_TEXT_NETWORK_ERROR.to_string(),
            execution_time_ms,
        }
    }

    /// Whether this error was produced by the request timeout
    pub fn is_timeout(&self) -> bool {
        self.status_code == 0 && self.status_text == STATUS_TEXT_TIMEOUT
    }
}

/// Main error type for api-join
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure from the HTTP primitive, propagated unchanged
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Caller input rejected before any network call
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input
        message: String,
        /// The input field that was rejected (e.g., "user_id")
        field: Option<String>,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api.base_url")
        key: Option<String>,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a validation error for a named input field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
