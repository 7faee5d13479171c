//! Local blob store: the whole collection serialized under one key.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nebula_core::domain::{NewComment, NewPost, Post, PostFilter, PostUpdate};
use nebula_core::error::RepoError;
use nebula_core::ports::{KeyValueStore, PostStore};

/// Key holding the JSON array of posts.
pub const LOCAL_POSTS_KEY: &str = "nebula_blog_posts";

/// Post store over a single key-value blob.
///
/// Each mutation reads the blob, changes it and writes it back while
/// holding `write_lock`, so writers in this process never interleave.
/// The blob is not shared safely between processes.
pub struct LocalPostStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LocalPostStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Post>, RepoError> {
        match self.kv.get(LOCAL_POSTS_KEY).await? {
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                tracing::error!(error = %e, "Stored post blob is corrupt");
                RepoError::from(e)
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), RepoError> {
        let blob = serde_json::to_string(posts)?;
        self.kv.set(LOCAL_POSTS_KEY, &blob, None).await?;
        Ok(())
    }

    /// Read-modify-write one post. Nothing is written when the id is absent.
    async fn mutate<F>(&self, id: &str, f: F) -> Result<Option<Post>, RepoError>
    where
        F: FnOnce(&mut Post),
    {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;

        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        f(post);
        let updated = post.clone();

        self.save(&posts).await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl PostStore for LocalPostStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let posts = self.load().await?;
        Ok(filter.apply(posts.iter()))
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.load().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, RepoError> {
        let post = Post::create(input);

        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Conflict(format!(
                "Post with id {} already exists",
                post.id
            )));
        }

        posts.insert(0, post.clone());
        self.save(&posts).await?;

        tracing::debug!(post_id = %post.id, total = posts.len(), "Post stored in local blob");
        Ok(post)
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, RepoError> {
        self.mutate(id, |p| p.apply_update(update)).await
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Ok(false);
        }

        self.save(&posts).await?;
        Ok(true)
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<Post>, RepoError> {
        self.mutate(id, Post::like).await
    }

    async fn add_comment(
        &self,
        id: &str,
        comment: NewComment,
    ) -> Result<Option<Post>, RepoError> {
        self.mutate(id, |p| {
            p.push_comment(comment);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileKeyValueStore, InMemoryKeyValueStore};
    use crate::store::contract;

    #[tokio::test]
    async fn test_contract_over_memory_kv() {
        let store = LocalPostStore::new(Arc::new(InMemoryKeyValueStore::new()));
        contract::run_all(&store).await;
    }

    #[tokio::test]
    async fn test_contract_over_file_kv() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::open(dir.path()).await.unwrap();
        contract::run_all(&LocalPostStore::new(Arc::new(kv))).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes() {
        let store = LocalPostStore::new(Arc::new(InMemoryKeyValueStore::new()));
        contract::concurrent_likes(Arc::new(store), 25).await;
    }

    #[tokio::test]
    async fn test_blob_layout() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = LocalPostStore::new(kv.clone());
        let created = store.create_post(contract::new_post("A")).await.unwrap();

        let blob = kv.get(LOCAL_POSTS_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["id"], created.id.as_str());
        assert_eq!(array[0]["likes"], 0);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_reported() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set(LOCAL_POSTS_KEY, "{oops", None).await.unwrap();
        let store = LocalPostStore::new(kv.clone());

        assert!(matches!(
            store.list_posts(&PostFilter::default()).await,
            Err(RepoError::Serialization(_))
        ));
        assert!(store.create_post(contract::new_post("A")).await.is_err());
        assert_eq!(
            kv.get(LOCAL_POSTS_KEY).await.unwrap().as_deref(),
            Some("{oops")
        );
    }
}
