//! In-memory document store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use nebula_core::domain::{NewComment, NewPost, Post, PostFilter, PostUpdate};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;

/// Post collection held in process memory.
///
/// Every mutation runs under the write lock, so concurrent increments on
/// the same post are serialized. Data is lost on restart.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    async fn mutate<F>(&self, id: &str, f: F) -> Option<Post>
    where
        F: FnOnce(&mut Post),
    {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|p| p.id == id)?;
        f(post);
        Some(post.clone())
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(filter.apply(posts.iter()))
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, RepoError> {
        let post = Post::create(input);
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Conflict(format!(
                "Post with id {} already exists",
                post.id
            )));
        }

        posts.push(post.clone());
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, RepoError> {
        Ok(self.mutate(id, |p| p.apply_update(update)).await)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.mutate(id, Post::like).await)
    }

    async fn add_comment(
        &self,
        id: &str,
        comment: NewComment,
    ) -> Result<Option<Post>, RepoError> {
        Ok(self
            .mutate(id, |p| {
                p.push_comment(comment);
            })
            .await)
    }
}
