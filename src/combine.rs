//! Combination engine: joins users, posts and comments into a nested view.
//!
//! The join is a full materialize-then-join over three collections related by
//! foreign keys (`post.user_id -> user.id`, `comment.post_id -> post.id`):
//!
//! 1. Comments are grouped by `post_id`, posts by `user_id`. Groups keep
//!    input order.
//! 2. Each user, in input order, takes its post group; each post takes its
//!    comment group. Absent groups are empty.
//! 3. Aggregates are computed per user and the result is stably sorted by
//!    `total_posts`, descending.
//!
//! Records whose foreign key matches no parent are dropped from the view.
//! Groups are moved out of the index as they are claimed, so a record can
//! appear under at most one parent.

use crate::types::{Comment, CommentSummary, CombinedUserData, Post, PostWithComments, User};
use crate::utils::round_to_hundredths;
use std::collections::HashMap;
use tracing::debug;

/// Totals over a combined view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombinationStats {
    /// Users in the view
    pub users: usize,
    /// Posts that were joined to a user
    pub posts: usize,
    /// Comments that were joined to a post
    pub comments: usize,
}

impl CombinationStats {
    /// Sum the per-user totals of a combined view
    pub fn of(combined: &[CombinedUserData]) -> Self {
        Self {
            users: combined.len(),
            posts: combined.iter().map(|u| u.total_posts).sum(),
            comments: combined.iter().map(|u| u.total_comments).sum(),
        }
    }
}

/// Join users, posts and comments into one [`CombinedUserData`] per user
///
/// Deterministic and total: any input, including empty collections, yields a
/// result. Users without posts appear with zero totals.
///
/// # Examples
///
/// ```
/// use api_join::combine::combine;
/// use api_join::types::User;
///
/// let users = vec![User {
///     id: 1,
///     name: "Leanne Graham".into(),
///     email: "Sincere@april.biz".into(),
///     username: "Bret".into(),
///     city: "Gwenborough".into(),
///     company: "Romaguera-Crona".into(),
/// }];
///
/// let combined = combine(users, vec![], vec![]);
/// assert_eq!(combined.len(), 1);
/// assert_eq!(combined[0].total_posts, 0);
/// assert_eq!(combined[0].average_comments_per_post, 0.0);
/// ```
pub fn combine(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Vec<CombinedUserData> {
    let mut comments_by_post = group_by(comments, |comment| comment.post_id);
    let mut posts_by_user = group_by(posts, |post| post.user_id);

    let mut combined: Vec<CombinedUserData> = users
        .into_iter()
        .map(|user| {
            let posts: Vec<PostWithComments> = posts_by_user
                .remove(&user.id)
                .unwrap_or_default()
                .into_iter()
                .map(|post| {
                    let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                    attach_comments(post, comments)
                })
                .collect();

            aggregate(user, posts)
        })
        .collect();

    let orphan_posts: usize = posts_by_user.values().map(Vec::len).sum();
    let orphan_comments: usize = comments_by_post.values().map(Vec::len).sum();
    if orphan_posts > 0 || orphan_comments > 0 {
        debug!(
            orphan_posts,
            orphan_comments, "records without a matching parent were left out"
        );
    }

    // Vec::sort_by is stable: users with equal post counts keep input order
    combined.sort_by(|a, b| b.total_posts.cmp(&a.total_posts));
    combined
}

fn group_by<T>(items: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut groups: HashMap<i64, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

fn attach_comments(post: Post, comments: Vec<Comment>) -> PostWithComments {
    let comments: Vec<CommentSummary> = comments.into_iter().map(CommentSummary::from).collect();

    PostWithComments {
        id: post.id,
        title: post.title,
        body: post.body,
        title_preview: post.title_preview,
        body_preview: post.body_preview,
        comments_count: comments.len(),
        comments,
    }
}

fn aggregate(user: User, posts: Vec<PostWithComments>) -> CombinedUserData {
    let total_posts = posts.len();
    let total_comments: usize = posts.iter().map(|post| post.comments_count).sum();
    let average_comments_per_post = if total_posts > 0 {
        round_to_hundredths(total_comments as f64 / total_posts as f64)
    } else {
        0.0
    };

    CombinedUserData {
        user,
        posts,
        total_posts,
        total_comments,
        average_comments_per_post,
    }
}
