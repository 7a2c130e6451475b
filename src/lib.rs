//! # api-join
//!
//! Concurrent fetch and client-side join of users, posts and comments from a
//! JSONPlaceholder-style REST API.
//!
//! ## Design Philosophy
//!
//! api-join is designed to be:
//! - **Deterministic** - The combination engine is a pure function of its inputs
//! - **Failure-total** - Scenarios never return an error, every failure becomes a result record
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Observable** - Every API call lands in an explicitly shared [`Telemetry`] sink
//!
//! ## Quick Start
//!
//! ```no_run
//! use api_join::{Config, ScenarioRunner, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = ScenarioRunner::new(&Config::default())?;
//!
//!     let result = runner.run_full_scenario().await;
//!     if let Some(users) = &result.data {
//!         for entry in users.iter().take(3) {
//!             println!(
//!                 "{}: {} posts, {} comments",
//!                 entry.user.name, entry.total_posts, entry.total_comments
//!             );
//!         }
//!     }
//!
//!     let result = runner.run_focused_scenario(UserId::new(1)?).await;
//!     println!("focused run made {} API calls", result.api_calls_count);
//!
//!     println!("{}", runner.telemetry().format_summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Combination engine joining the three collections
pub mod combine;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP transport primitive
pub mod http;
/// Scenario orchestration
pub mod scenario;
/// Entity fetchers and the data source seam
pub mod source;
/// Log entries and API call summary
pub mod telemetry;
/// Core entity and result types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use combine::{CombinationStats, combine};
pub use config::{ApiConfig, Config, TelemetryConfig};
pub use error::{Error, HttpError, Result};
pub use http::{HttpClient, HttpResponse, RequestOptions};
pub use scenario::ScenarioRunner;
pub use source::{ApiClient, DataSource, FetchResult};
pub use telemetry::{ApiCallRecord, ApiCallStatus, ExecutionSummary, LogEntry, LogLevel, Telemetry};
pub use types::{
    CombinedUserData, Comment, CommentSummary, Post, PostWithComments, ProcessedCounts,
    ScenarioExecutionResult, User, UserId, UserSummary,
};
