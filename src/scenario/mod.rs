//! Scenario orchestration: concurrent fetch fan-out, call counting and
//! failure-to-result conversion.
//!
//! [`ScenarioRunner`] has two entry points, split across submodules:
//! - [`full`] - every user, post and comment, fetched concurrently
//! - [`focused`] - one user, their posts, then the comments of each post
//!
//! Neither entry point returns an error. Any failure inside the pipeline is
//! converted into a [`ScenarioExecutionResult`] with `success == false`.
//!
//! [`ScenarioExecutionResult`]: crate::types::ScenarioExecutionResult

pub mod focused;
pub mod full;


use crate::combine::{CombinationStats, combine};
use crate::config::Config;
use crate::error::Result;
use crate::source::{ApiClient, DataSource};
use crate::telemetry::Telemetry;
use crate::types::{CombinedUserData, Comment, Post, User};
use std::sync::Arc;
use tracing::debug;

/// Runs the full and focused scenarios against a [`DataSource`]
///
/// Each call to a `run_*` method is independent: counters and timers live on
/// the stack of that call, so one runner can be shared across tasks.
///
/// # Examples
///
/// ```no_run
/// # use api_join::*;
/// # async fn example() -> Result<()> {
/// let runner = ScenarioRunner::new(&Config::default())?;
///
/// let result = runner.run_full_scenario().await;
/// println!("success: {}, api calls: {}", result.success, result.api_calls_count);
///
/// let result = runner.run_focused_scenario("1".parse()?).await;
/// println!("posts: {}", result.processed_posts_count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ScenarioRunner {
    source: Arc<dyn DataSource>,
    telemetry: Arc<Telemetry>,
}

impl ScenarioRunner {
    /// Create a runner that fetches over HTTP with the given configuration
    ///
    /// The telemetry sink is built from `config.telemetry` and shared with the
    /// HTTP client; reach it through [`ScenarioRunner::telemetry`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid, or
    /// [`crate::Error::Other`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let telemetry = Arc::new(Telemetry::new(config.telemetry.clone()));
        let client = ApiClient::new(config, telemetry.clone())?;
        Ok(Self::with_source(Arc::new(client), telemetry))
    }

    /// Create a runner over any data source
    pub fn with_source(source: Arc<dyn DataSource>, telemetry: Arc<Telemetry>) -> Self {
        Self { source, telemetry }
    }

    /// Telemetry sink the runner logs to
    pub fn telemetry(&self) -> &Arc<Telemetry> {
        &self.telemetry
    }

    /// Name of the underlying data source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    // Join and log the totals that made it into the view
    fn combine_logged(
        &self,
        users: Vec<User>,
        posts: Vec<Post>,
        comments: Vec<Comment>,
    ) -> Vec<CombinedUserData> {
        self.telemetry.info("Starting data combination process...", None);
        let combined = combine(users, posts, comments);

        let stats = CombinationStats::of(&combined);
        debug!(
            users = stats.users,
            posts = stats.posts,
            comments = stats.comments,
            "data combination completed"
        );
        self.telemetry.info("Data combination completed:", None);
        self.telemetry
            .info(format!("- Users processed: {}", stats.users), None);
        self.telemetry
            .info(format!("- Posts processed: {}", stats.posts), None);
        self.telemetry
            .info(format!("- Comments processed: {}", stats.comments), None);

        combined
    }
}
