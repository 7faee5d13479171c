use async_trait::async_trait;

use crate::domain::{NewComment, NewPost, Post, PostFilter, PostUpdate};
use crate::error::RepoError;

/// Persistence contract over the post collection.
///
/// Every backend honours the same semantics: a missing id is a normal
/// `None`/`false` outcome, each mutation is atomic against its backend,
/// and listings are ordered newest-created-first.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// List posts matching the filter, newest first.
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a new post. A caller-supplied id that already exists is a conflict.
    async fn create_post(&self, input: NewPost) -> Result<Post, RepoError>;

    /// Replace the editable fields, keeping id, created_at, likes, views and comments.
    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, RepoError>;

    /// Remove a post together with its comments. Returns `false` if absent.
    async fn delete_post(&self, id: &str) -> Result<bool, RepoError>;

    /// Add exactly one like without losing concurrent increments.
    async fn increment_likes(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Append a comment to the end of the post's comment list.
    async fn add_comment(&self, id: &str, comment: NewComment)
    -> Result<Option<Post>, RepoError>;
}
