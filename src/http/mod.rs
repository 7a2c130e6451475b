//! Transport primitive: one bounded GET, decoded as JSON.
//!
//! [`HttpClient::get_json`] wraps the whole request lifecycle (connect, send,
//! status check, body read, decode) in a single timeout and reports the
//! elapsed wall-clock time. Every failure is normalized into [`HttpError`].

use crate::config::ApiConfig;
use crate::error::{Error, HttpError, Result};
use crate::utils::elapsed_ms;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Per-request overrides
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Timeout for this request (defaults to the client's configured timeout)
    pub timeout: Option<Duration>,
    /// Headers added on top of the client's defaults, replacing same-named ones
    pub headers: HashMap<String, String>,
}

/// Successful GET with its decoded body
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse<T> {
    /// Decoded body
    pub data: T,
    /// HTTP status code
    pub status_code: u16,
    /// HTTP reason phrase
    pub status_text: String,
    /// Wall-clock time spent on the request in milliseconds
    pub execution_time_ms: f64,
}

impl<T> HttpResponse<T> {
    /// Transform the body, keeping status and timing unchanged
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HttpResponse<U> {
        HttpResponse {
            data: f(self.data),
            status_code: self.status_code,
            status_text: self.status_text,
            execution_time_ms: self.execution_time_ms,
        }
    }
}

// Failures observed inside the timeout window, before timing is attached
enum Failure {
    Status(StatusCode),
    Timeout,
    Network(String),
}

/// Reusable JSON GET client
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
    headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a client from API settings
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // No client-level timeout: each request is bounded by get_json itself
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
            headers: config.headers.clone(),
        })
    }

    /// GET `url` and decode the body as `T`
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] when:
    /// - the response status is not 2xx (status code and reason from the response)
    /// - the request does not finish within the timeout (status 0, `"Timeout"`)
    /// - the connection fails or the body is not valid JSON for `T`
    ///   (status 0, `"Network Error"`)
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> std::result::Result<HttpResponse<T>, HttpError> {
        let start = Instant::now();
        let timeout = options.timeout.unwrap_or(self.timeout);

        let outcome = match self.build_headers(&options.headers) {
            Ok(headers) => {
                let request = self.client.get(url).headers(headers);
                match tokio::time::timeout(timeout, async move {
                    let response = request.send().await.map_err(map_transport_error)?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(Failure::Status(status));
                    }
                    let body = response.bytes().await.map_err(map_transport_error)?;
                    let data = serde_json::from_slice::<T>(&body)
                        .map_err(|e| Failure::Network(format!("invalid JSON body: {}", e)))?;
                    Ok((status, data))
                })
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(Failure::Timeout),
                }
            }
            Err(message) => Err(Failure::Network(message)),
        };

        let execution_time_ms = elapsed_ms(start);
        match outcome {
            Ok((status, data)) => {
                debug!(
                    url = %url,
                    status = status.as_u16(),
                    elapsed_ms = execution_time_ms,
                    "GET completed"
                );
                Ok(HttpResponse {
                    data,
                    status_code: status.as_u16(),
                    status_text: reason_phrase(status),
                    execution_time_ms,
                })
            }
            Err(failure) => {
                let error = match failure {
                    Failure::Status(status) => {
                        HttpError::status(status.as_u16(), reason_phrase(status), execution_time_ms)
                    }
                    Failure::Timeout => HttpError::timeout(timeout.as_millis(), execution_time_ms),
                    Failure::Network(detail) => HttpError::network(detail, execution_time_ms),
                };
                warn!(url = %url, error = %error, "GET failed");
                Err(error)
            }
        }
    }

    fn build_headers(
        &self,
        overrides: &HashMap<String, String>,
    ) -> std::result::Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in self.headers.iter().chain(overrides.iter()) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("invalid header name '{}': {}", name, e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header '{}': {}", name, e))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

fn map_transport_error(error: reqwest::Error) -> Failure {
    if error.is_timeout() {
        Failure::Timeout
    } else {
        Failure::Network(error.to_string())
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
