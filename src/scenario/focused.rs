//! Focused scenario: one user, their posts, and the comments on each post.

use crate::error::HttpError;
use crate::types::{CombinedUserData, ProcessedCounts, ScenarioExecutionResult, UserId};
use crate::utils::elapsed_whole_ms;
use futures::future::{try_join, try_join_all};
use std::time::Instant;
use tracing::{info, warn};

use super::ScenarioRunner;

impl ScenarioRunner {
    /// Fetch one user and everything attached to them, then join
    ///
    /// Runs in two phases:
    /// 1. The user and the user's posts are fetched concurrently (2 calls).
    /// 2. The comments of every post are fetched concurrently, one call per
    ///    post. A user without posts makes no comment calls.
    ///
    /// On success `api_calls_count` is `2 + post_count`. On failure it holds
    /// the calls of the phases that completed: 0 if phase 1 failed, 2 if a
    /// comment fetch failed.
    ///
    /// `user_id` is a validated [`UserId`], so an invalid id is rejected by
    /// its constructor before any request is made.
    pub async fn run_focused_scenario(&self, user_id: UserId) -> ScenarioExecutionResult {
        let start = Instant::now();
        let mut api_calls_count = 0;
        info!(%user_id, source = self.source.name(), "starting focused scenario");
        self.telemetry.info(
            format!("Starting focused scenario for user ID: {}...", user_id),
            None,
        );

        match self.try_run_focused(user_id, &mut api_calls_count).await {
            Ok((data, counts)) => {
                let elapsed = elapsed_whole_ms(start);
                self.telemetry.info(
                    format!("Focused scenario completed successfully in {}ms", elapsed),
                    None,
                );
                info!(
                    %user_id,
                    elapsed_ms = elapsed,
                    api_calls = api_calls_count,
                    "focused scenario completed"
                );

                ScenarioExecutionResult::succeeded(data, elapsed, api_calls_count, counts)
            }
            Err(e) => {
                let elapsed = elapsed_whole_ms(start);
                self.telemetry.error(
                    format!("Focused scenario failed after {}ms: {}", elapsed, e),
                    None,
                );
                warn!(
                    %user_id,
                    elapsed_ms = elapsed,
                    api_calls = api_calls_count,
                    error = %e,
                    "focused scenario failed"
                );

                ScenarioExecutionResult::failed(e.to_string(), elapsed, api_calls_count)
            }
        }
    }

    // Calls are committed to `api_calls_count` only once a phase completes
    async fn try_run_focused(
        &self,
        user_id: UserId,
        api_calls_count: &mut usize,
    ) -> Result<(Vec<CombinedUserData>, ProcessedCounts), HttpError> {
        let (user, posts) = try_join(
            self.source.fetch_user_by_id(user_id),
            self.source.fetch_posts_by_user_id(user_id),
        )
        .await?;
        *api_calls_count = 2;

        let comment_fetches: Vec<_> = posts
            .data
            .iter()
            .map(|post| self.source.fetch_comments_by_post_id(post.id))
            .collect();
        let fetch_count = comment_fetches.len();
        let comment_responses = try_join_all(comment_fetches).await?;
        *api_calls_count += fetch_count;

        let comments: Vec<_> = comment_responses
            .into_iter()
            .flat_map(|response| response.data)
            .collect();

        self.telemetry.info("Focused scenario data fetched:", None);
        self.telemetry
            .info(format!("- User: {}", user.data.name), None);
        self.telemetry
            .info(format!("- Posts: {}", posts.data.len()), None);
        self.telemetry
            .info(format!("- Comments: {}", comments.len()), None);

        let counts = ProcessedCounts {
            users: 1,
            posts: posts.data.len(),
            comments: comments.len(),
        };
        let combined = self.combine_logged(vec![user.data], posts.data, comments);

        Ok((combined, counts))
    }
}
