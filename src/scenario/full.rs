//! Full scenario: all users, posts and comments.

use crate::error::HttpError;
use crate::types::{CombinedUserData, ProcessedCounts, ScenarioExecutionResult};
use crate::utils::elapsed_whole_ms;
use futures::future::try_join3;
use std::time::Instant;
use tracing::{info, warn};

use super::ScenarioRunner;

/// Number of requests the full scenario issues
pub const FULL_SCENARIO_API_CALLS: usize = 3;

impl ScenarioRunner {
    /// Fetch every user, post and comment concurrently and join them
    ///
    /// The three fetches run concurrently. If any of them fails the scenario
    /// fails as a whole: no partial combination is attempted and the result
    /// carries no data.
    ///
    /// On success `api_calls_count` is always 3. On failure it is 0, even
    /// when some of the fetches completed before the failing one.
    pub async fn run_full_scenario(&self) -> ScenarioExecutionResult {
        let start = Instant::now();
        info!(source = self.source.name(), "starting full scenario");
        self.telemetry
            .info("Starting user-post validation scenario...", None);

        match self.try_run_full().await {
            Ok((data, counts)) => {
                let elapsed = elapsed_whole_ms(start);
                self.telemetry.info(
                    format!("Scenario completed successfully in {}ms", elapsed),
                    None,
                );
                self.telemetry
                    .info(format!("Processed {} users with combined data", data.len()), None);
                info!(elapsed_ms = elapsed, users = data.len(), "full scenario completed");

                ScenarioExecutionResult::succeeded(data, elapsed, FULL_SCENARIO_API_CALLS, counts)
            }
            Err(e) => {
                let elapsed = elapsed_whole_ms(start);
                self.telemetry
                    .error(format!("Scenario failed after {}ms: {}", elapsed, e), None);
                warn!(elapsed_ms = elapsed, error = %e, "full scenario failed");

                ScenarioExecutionResult::failed(e.to_string(), elapsed, 0)
            }
        }
    }

    async fn try_run_full(
        &self,
    ) -> Result<(Vec<CombinedUserData>, ProcessedCounts), HttpError> {
        self.telemetry
            .info("Fetching data from multiple APIs in parallel...", None);

        let (users, posts, comments) = try_join3(
            self.source.fetch_users(),
            self.source.fetch_posts(),
            self.source.fetch_comments(),
        )
        .await?;

        for (count, kind, execution_time_ms) in [
            (users.data.len(), "users", users.execution_time_ms),
            (posts.data.len(), "posts", posts.execution_time_ms),
            (comments.data.len(), "comments", comments.execution_time_ms),
        ] {
            self.telemetry.info(
                format!("Fetched {} {} in {:.0}ms", count, kind, execution_time_ms),
                None,
            );
        }

        let counts = ProcessedCounts {
            users: users.data.len(),
            posts: posts.data.len(),
            comments: comments.data.len(),
        };

        self.telemetry.info("Processing and combining data...", None);
        let combined = self.combine_logged(users.data, posts.data, comments.data);

        Ok((combined, counts))
    }
}
