//! Comment fetchers and the raw-to-processed comment mapping.

use super::{ApiClient, FetchResult};
use crate::types::Comment;
use crate::utils::{BODY_PREVIEW_CHARS, preview};
use serde::Deserialize;

/// Raw comment record as returned by `/comments`
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentApiResponse {
    /// Post the comment belongs to
    pub post_id: i64,
    /// Comment ID
    pub id: i64,
    /// Subject line
    pub name: String,
    /// Author email
    pub email: String,
    /// Body
    pub body: String,
}

/// Map a raw comment into its processed shape with a body preview
pub fn transform_comment(raw: CommentApiResponse) -> Comment {
    Comment {
        id: raw.id,
        post_id: raw.post_id,
        name: raw.name,
        email: raw.email,
        body_preview: preview(&raw.body, BODY_PREVIEW_CHARS),
        body: raw.body,
    }
}

impl ApiClient {
    /// Fetch all comments
    pub async fn fetch_comments(&self) -> FetchResult<Vec<Comment>> {
        let response = self.get::<Vec<CommentApiResponse>>("/comments").await?;
        Ok(response.map(|raw| raw.into_iter().map(transform_comment).collect()))
    }

    /// Fetch the comments on one post
    pub async fn fetch_comments_by_post_id(&self, post_id: i64) -> FetchResult<Vec<Comment>> {
        let response = self
            .get::<Vec<CommentApiResponse>>(&format!("/comments?postId={}", post_id))
            .await?;
        Ok(response.map(|raw| raw.into_iter().map(transform_comment).collect()))
    }

    /// Fetch a specific comment by ID
    pub async fn fetch_comment_by_id(&self, comment_id: i64) -> FetchResult<Comment> {
        let response = self
            .get::<CommentApiResponse>(&format!("/comments/{}", comment_id))
            .await?;
        Ok(response.map(transform_comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_preview_is_cut_past_one_hundred_characters() {
        let comment = transform_comment(CommentApiResponse {
            post_id: 1,
            id: 2,
            name: "id labore ex et quam laborum".into(),
            email: "Eliseo@gardner.biz".into(),
            body: "c".repeat(101),
        });

        assert_eq!(comment.post_id, 1);
        assert_eq!(comment.body.len(), 101);
        assert_eq!(comment.body_preview, format!("{}...", "c".repeat(100)));
    }

    #[test]
    fn short_body_preview_equals_body() {
        let comment = transform_comment(CommentApiResponse {
            post_id: 1,
            id: 2,
            name: "n".into(),
            email: "e".into(),
            body: "laudantium enim quasi".into(),
        });
        assert_eq!(comment.body_preview, comment.body);
    }
}
