//! Telemetry sink for scenario runs.
//!
//! [`Telemetry`] is an explicitly constructed, append-only side channel: the
//! orchestrator and the API client write log entries and API call records to
//! it, and nothing in the scenario logic reads them back. Every entry is also
//! emitted as a `tracing` event, so a subscriber installed by the embedding
//! application sees the same stream.
//!
//! Share one instance as `Arc<Telemetry>` for the lifetime of the application.

use crate::config::TelemetryConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

/// Severity of a log entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Progress information
    Info,
    /// Recoverable or suspicious condition
    Warn,
    /// Failure
    Error,
    /// Diagnostic detail
    Debug,
}

/// One retained log entry
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Message text
    pub message: String,
    /// Optional structured payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Duration of the operation the entry reports on, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
}

/// Whether a recorded API call succeeded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiCallStatus {
    /// 2xx response decoded successfully
    Success,
    /// Any transport failure
    Error,
}

/// One recorded API call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRecord {
    /// Requested URL
    pub url: String,
    /// Request duration in milliseconds
    pub execution_time_ms: f64,
    /// Outcome
    pub status: ApiCallStatus,
    /// HTTP status code, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Aggregate of every API call recorded since the last reset
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    /// Sum of call durations in milliseconds
    pub total_execution_time_ms: f64,
    /// Number of calls
    pub api_call_count: usize,
    /// Calls that succeeded
    pub success_count: usize,
    /// Calls that failed
    pub error_count: usize,
    /// Calls in recording order
    pub api_calls: Vec<ApiCallRecord>,
}

#[derive(Default)]
struct TelemetryState {
    entries: VecDeque<LogEntry>,
    summary: ExecutionSummary,
}

/// Append-only log and API call recorder
pub struct Telemetry {
    config: TelemetryConfig,
    state: Mutex<TelemetryState>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}

impl Telemetry {
    /// Create an empty telemetry sink
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            config,
            state: Mutex::new(TelemetryState::default()),
        }
    }

    /// Record an info entry
    pub fn info(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.log(LogLevel::Info, message.into(), data, None);
    }

    /// Record a warning entry
    pub fn warn(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.log(LogLevel::Warn, message.into(), data, None);
    }

    /// Record an error entry
    pub fn error(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.log(LogLevel::Error, message.into(), data, None);
    }

    /// Record a debug entry
    pub fn debug(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.log(LogLevel::Debug, message.into(), data, None);
    }

    /// Record the completion of a timed operation as `"{operation} completed"`
    pub fn record(
        &self,
        operation: &str,
        execution_time_ms: f64,
        data: Option<serde_json::Value>,
    ) {
        self.log(
            LogLevel::Info,
            format!("{} completed", operation),
            data,
            Some(execution_time_ms),
        );
    }

    /// Record a payload before and after a processing step
    pub fn record_data_transformation(
        &self,
        operation: &str,
        before: serde_json::Value,
        after: serde_json::Value,
    ) {
        self.info(format!("{} - Before processing:", operation), Some(before));
        self.info(format!("{} - After processing:", operation), Some(after));
    }

    /// Record the outcome of one API call in the execution summary
    pub fn record_api_call(
        &self,
        url: &str,
        execution_time_ms: f64,
        success: bool,
        status_code: Option<u16>,
    ) {
        tracing::debug!(
            url = %url,
            elapsed_ms = execution_time_ms,
            success,
            status_code = ?status_code,
            "api call recorded"
        );

        if !self.config.enabled {
            return;
        }

        let mut state = self.lock();
        let summary = &mut state.summary;
        summary.api_call_count += 1;
        summary.total_execution_time_ms += execution_time_ms;
        if success {
            summary.success_count += 1;
        } else {
            summary.error_count += 1;
        }
        summary.api_calls.push(ApiCallRecord {
            url: url.to_string(),
            execution_time_ms,
            status: if success {
                ApiCallStatus::Success
            } else {
                ApiCallStatus::Error
            },
            status_code,
        });
    }

    /// Snapshot of the execution summary
    pub fn summary(&self) -> ExecutionSummary {
        self.lock().summary.clone()
    }

    /// Snapshot of the retained log entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Clear entries and the execution summary
    pub fn reset(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.summary = ExecutionSummary::default();
    }

    /// Render the execution summary as a human-readable block
    pub fn format_summary(&self) -> String {
        let summary = self.summary();
        let mut out = String::new();

        let _ = writeln!(out, "=== Execution Summary ===");
        let _ = writeln!(
            out,
            "Total Execution Time: {:.2}ms",
            summary.total_execution_time_ms
        );
        let _ = writeln!(out, "API Calls: {}", summary.api_call_count);
        let _ = writeln!(out, "Success: {}", summary.success_count);
        let _ = writeln!(out, "Errors: {}", summary.error_count);

        if !summary.api_calls.is_empty() {
            let _ = writeln!(out, "\nAPI Call Details:");
            for (index, call) in summary.api_calls.iter().enumerate() {
                let mark = match call.status {
                    ApiCallStatus::Success => '✓',
                    ApiCallStatus::Error => '✗',
                };
                let code = match call.status_code {
                    Some(code) if code != 0 => format!(" ({})", code),
                    _ => String::new(),
                };
                let _ = writeln!(
                    out,
                    "  {}. {} {}{} - {:.2}ms",
                    index + 1,
                    mark,
                    call.url,
                    code,
                    call.execution_time_ms
                );
            }
        }
        let _ = write!(out, "========================");
        out
    }

    /// Emit the execution summary through `tracing`
    pub fn log_summary(&self) {
        tracing::info!("{}", self.format_summary());
    }

    fn log(
        &self,
        level: LogLevel,
        message: String,
        data: Option<serde_json::Value>,
        execution_time_ms: Option<f64>,
    ) {
        self.emit(level, &message, data.as_ref(), execution_time_ms);

        if !self.config.enabled {
            return;
        }

        let mut state = self.lock();
        if self.config.max_entries == 0 {
            return;
        }
        while state.entries.len() >= self.config.max_entries {
            state.entries.pop_front();
        }
        state.entries.push_back(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
            data,
            execution_time_ms,
        });
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        data: Option<&serde_json::Value>,
        execution_time_ms: Option<f64>,
    ) {
        let payload = match data {
            Some(value) if self.config.log_payloads => value.to_string(),
            _ => String::new(),
        };

        match level {
            LogLevel::Info => {
                tracing::info!(elapsed_ms = ?execution_time_ms, data = %payload, "{}", message)
            }
            LogLevel::Warn => {
                tracing::warn!(elapsed_ms = ?execution_time_ms, data = %payload, "{}", message)
            }
            LogLevel::Error => {
                tracing::error!(elapsed_ms = ?execution_time_ms, data = %payload, "{}", message)
            }
            LogLevel::Debug => {
                tracing::debug!(elapsed_ms = ?execution_time_ms, data = %payload, "{}", message)
            }
        }
    }

    // A panic while holding the lock leaves only append-only data behind,
    // which is still safe to read and extend.
    fn lock(&self) -> MutexGuard<'_, TelemetryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
