//! Entity fetchers for users, posts and comments.
//!
//! [`ApiClient`] wraps the transport primitive once per resource type and maps
//! every raw record into its processed shape. The methods are split by
//! resource:
//! - [`users`] - `/users`, `/users/{id}`
//! - [`posts`] - `/posts`, `/posts?userId={id}`, `/posts/{id}`
//! - [`comments`] - `/comments`, `/comments?postId={id}`, `/comments/{id}`
//!
//! Fetchers do no error handling of their own: transport errors, status and
//! timing pass through unchanged.
//!
//! The orchestrator depends on the [`DataSource`] trait rather than on
//! `ApiClient` directly, so an in-memory source can stand in for the network.

pub mod comments;
pub mod posts;
pub mod users;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use comments::{CommentApiResponse, transform_comment};
pub use posts::{PostApiResponse, transform_post};
pub use users::{UserApiResponse, transform_user};

use crate::config::Config;
use crate::error::{HttpError, Result};
use crate::http::{HttpClient, HttpResponse, RequestOptions};
use crate::telemetry::Telemetry;
use crate::types::{Comment, Post, User, UserId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Outcome of one entity fetch
pub type FetchResult<T> = std::result::Result<HttpResponse<T>, HttpError>;

/// Source of the three entity collections
///
/// This trait is the seam between the scenario orchestrator and the network.
/// [`ApiClient`] is the HTTP implementation; tests and embedders may provide
/// their own.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch every user
    async fn fetch_users(&self) -> FetchResult<Vec<User>>;

    /// Fetch one user
    async fn fetch_user_by_id(&self, user_id: UserId) -> FetchResult<User>;

    /// Fetch every post
    async fn fetch_posts(&self) -> FetchResult<Vec<Post>>;

    /// Fetch the posts owned by one user
    async fn fetch_posts_by_user_id(&self, user_id: UserId) -> FetchResult<Vec<Post>>;

    /// Fetch every comment
    async fn fetch_comments(&self) -> FetchResult<Vec<Comment>>;

    /// Fetch the comments on one post
    async fn fetch_comments_by_post_id(&self, post_id: i64) -> FetchResult<Vec<Comment>>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// HTTP client for the users/posts/comments REST API
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    telemetry: Arc<Telemetry>,
}

impl ApiClient {
    /// Create a client for the configured API
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &Config, telemetry: Arc<Telemetry>) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(&config.api)?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            telemetry,
        })
    }

    /// Base URL resource paths are appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    // Every request goes through here so that each call lands in the
    // telemetry summary exactly once.
    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> FetchResult<T> {
        let url = self.url(path_and_query);
        let result = self
            .http
            .get_json::<T>(&url, &RequestOptions::default())
            .await;

        match &result {
            Ok(response) => self.telemetry.record_api_call(
                &url,
                response.execution_time_ms,
                true,
                Some(response.status_code),
            ),
            Err(error) => self.telemetry.record_api_call(
                &url,
                error.execution_time_ms,
                false,
                (error.status_code != 0).then_some(error.status_code),
            ),
        }

        result
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch_users(&self) -> FetchResult<Vec<User>> {
        ApiClient::fetch_users(self).await
    }

    async fn fetch_user_by_id(&self, user_id: UserId) -> FetchResult<User> {
        ApiClient::fetch_user_by_id(self, user_id).await
    }

    async fn fetch_posts(&self) -> FetchResult<Vec<Post>> {
        ApiClient::fetch_posts(self).await
    }

    async fn fetch_posts_by_user_id(&self, user_id: UserId) -> FetchResult<Vec<Post>> {
        ApiClient::fetch_posts_by_user_id(self, user_id).await
    }

    async fn fetch_comments(&self) -> FetchResult<Vec<Comment>> {
        ApiClient::fetch_comments(self).await
    }

    async fn fetch_comments_by_post_id(&self, post_id: i64) -> FetchResult<Vec<Comment>> {
        ApiClient::fetch_comments_by_post_id(self, post_id).await
    }

    fn name(&self) -> &str {
        "http"
    }
}
