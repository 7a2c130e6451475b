//! Post fetchers and the raw-to-processed post mapping.

use super::{ApiClient, FetchResult};
use crate::types::{Post, UserId};
use crate::utils::{BODY_PREVIEW_CHARS, TITLE_PREVIEW_CHARS, preview};
use serde::Deserialize;

/// Raw post record as returned by `/posts`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostApiResponse {
    /// Owning user
    pub user_id: i64,
    /// Post ID
    pub id: i64,
    /// Title
    pub title: String,
    /// Body
    pub body: String,
}

/// Map a raw post into its processed shape with title and body previews
pub fn transform_post(raw: PostApiResponse) -> Post {
    Post {
        id: raw.id,
        user_id: raw.user_id,
        title_preview: preview(&raw.title, TITLE_PREVIEW_CHARS),
        body_preview: preview(&raw.body, BODY_PREVIEW_CHARS),
        title: raw.title,
        body: raw.body,
    }
}

impl ApiClient {
    /// Fetch all posts
    pub async fn fetch_posts(&self) -> FetchResult<Vec<Post>> {
        let response = self.get::<Vec<PostApiResponse>>("/posts").await?;
        Ok(response.map(|raw| raw.into_iter().map(transform_post).collect()))
    }

    /// Fetch the posts owned by one user
    pub async fn fetch_posts_by_user_id(&self, user_id: UserId) -> FetchResult<Vec<Post>> {
        let response = self
            .get::<Vec<PostApiResponse>>(&format!("/posts?userId={}", user_id))
            .await?;
        Ok(response.map(|raw| raw.into_iter().map(transform_post).collect()))
    }

    /// Fetch a specific post by ID
    pub async fn fetch_post_by_id(&self, post_id: i64) -> FetchResult<Post> {
        let response = self
            .get::<PostApiResponse>(&format!("/posts/{}", post_id))
            .await?;
        Ok(response.map(transform_post))
    }
}
