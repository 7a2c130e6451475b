//! Core types for api-join
//!
//! Processed entities as produced by the fetchers, the nested per-user view
//! produced by the combination engine, and the scenario result record.
//! All of them serialize to the camelCase JSON shape consumed by the
//! presentation layer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Validated identifier of the user a focused scenario targets
///
/// Only positive integers are accepted, so a value of this type can be
/// handed to the orchestrator without further checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `id` is zero or negative.
    pub fn new(id: i64) -> Result<Self> {
        if id <= 0 {
            return Err(Error::validation(
                "user_id",
                format!("user ID must be a positive number, got {}", id),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self> {
        Self::new(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let id = trimmed.parse::<i64>().map_err(|_| {
            Error::validation(
                "user_id",
                format!("user ID must be a positive number, got '{}'", trimmed),
            )
        })?;
        Self::new(id)
    }
}

/// User reduced to the fields the combined view needs
///
/// `city` and `company` are flattened from the raw `address.city` and
/// `company.name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID, unique within a fetched collection
    pub id: i64,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Login name
    pub username: String,
    /// City from the user's address
    pub city: String,
    /// Company name
    pub company: String,
}

/// Post with derived preview fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post ID
    pub id: i64,
    /// Owning user (not checked against any user collection)
    pub user_id: i64,
    /// Full title
    pub title: String,
    /// Full body
    pub body: String,
    /// Title capped at 50 characters, `...` appended when cut
    pub title_preview: String,
    /// Body capped at 100 characters, `...` appended when cut
    pub body_preview: String,
}

/// Comment with a derived body preview
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment ID
    pub id: i64,
    /// Post the comment belongs to (not checked against any post collection)
    pub post_id: i64,
    /// Comment subject line
    pub name: String,
    /// Author email
    pub email: String,
    /// Full body
    pub body: String,
    /// Body capped at 100 characters, `...` appended when cut
    pub body_preview: String,
}

/// User fields carried into the combined view
pub type UserSummary = User;

/// Comment as it appears nested under a post: no `postId`, no full body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    /// Comment ID
    pub id: i64,
    /// Comment subject line
    pub name: String,
    /// Author email
    pub email: String,
    /// Body preview
    pub body_preview: String,
}

impl From<Comment> for CommentSummary {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            name: comment.name,
            email: comment.email,
            body_preview: comment.body_preview,
        }
    }
}

/// Post nested under its user, with the comments joined to it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    /// Post ID
    pub id: i64,
    /// Full title
    pub title: String,
    /// Full body
    pub body: String,
    /// Title preview
    pub title_preview: String,
    /// Body preview
    pub body_preview: String,
    /// Number of joined comments, always `comments.len()`
    pub comments_count: usize,
    /// Joined comments in input order
    pub comments: Vec<CommentSummary>,
}

/// Per-user nested view with aggregates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedUserData {
    /// The user
    pub user: UserSummary,
    /// The user's posts in input order, possibly empty
    pub posts: Vec<PostWithComments>,
    /// `posts.len()`
    pub total_posts: usize,
    /// Sum of `comments_count` over `posts`
    pub total_comments: usize,
    /// `total_comments / total_posts` rounded to two decimals, 0 without posts
    pub average_comments_per_post: f64,
}

/// Fetched-record counts reported by a successful scenario
///
/// These count what was fetched, not what survived the join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessedCounts {
    /// Users fetched
    pub users: usize,
    /// Posts fetched
    pub posts: usize,
    /// Comments fetched
    pub comments: usize,
}

/// Outcome of one scenario execution
///
/// Exactly one of `data` and `error` is populated, matching `success`. Use
/// [`ScenarioExecutionResult::succeeded`] and [`ScenarioExecutionResult::failed`]
/// to build values that keep this invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioExecutionResult {
    /// Whether the whole pipeline completed
    pub success: bool,
    /// Combined view, present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CombinedUserData>>,
    /// Failure message, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock duration of the scenario in milliseconds
    #[serde(rename = "executionTime")]
    pub execution_time_ms: u64,
    /// API calls counted for the scenario
    pub api_calls_count: usize,
    /// Users fetched (0 on failure)
    pub processed_users_count: usize,
    /// Posts fetched (0 on failure)
    pub processed_posts_count: usize,
    /// Comments fetched (0 on failure)
    pub processed_comments_count: usize,
}

impl ScenarioExecutionResult {
    /// Result of a scenario whose fetches and combination all completed
    pub fn succeeded(
        data: Vec<CombinedUserData>,
        execution_time_ms: u64,
        api_calls_count: usize,
        counts: ProcessedCounts,
    ) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            execution_time_ms,
            api_calls_count,
            processed_users_count: counts.users,
            processed_posts_count: counts.posts,
            processed_comments_count: counts.comments,
        }
    }

    /// Result of a scenario that stopped on an error; all processed counts are 0
    pub fn failed(error: impl Into<String>, execution_time_ms: u64, api_calls_count: usize) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            execution_time_ms,
            api_calls_count,
            processed_users_count: 0,
            processed_posts_count: 0,
            processed_comments_count: 0,
        }
    }
}
