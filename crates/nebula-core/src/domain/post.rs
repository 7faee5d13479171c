use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Comment, NewComment, NewPost, PostUpdate};

/// Post entity - a blog article with its embedded comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub cover_image: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub likes: u64,
    pub views: u64,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a post from validated input, assigning id and timestamp when absent.
    pub fn create(input: NewPost) -> Self {
        Self {
            id: input.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            cover_image: input.cover_image,
            category: input.category,
            tags: input.tags,
            author: input.author,
            created_at: input.created_at.unwrap_or_else(now_millis),
            likes: 0,
            views: 0,
            comments: Vec::new(),
        }
    }

    /// Replace the author-editable fields.
    ///
    /// id, created_at, likes, views and comments always survive an update.
    pub fn apply_update(&mut self, update: PostUpdate) {
        self.title = update.title;
        self.excerpt = update.excerpt;
        self.content = update.content;
        self.cover_image = update.cover_image;
        self.category = update.category;
        self.tags = update.tags;
        self.author = update.author;
    }

    pub fn like(&mut self) {
        self.likes = self.likes.saturating_add(1);
    }

    /// Append a new comment (oldest first).
    pub fn push_comment(&mut self, input: NewComment) -> &Comment {
        self.comments.push(Comment::new(input));
        &self.comments[self.comments.len() - 1]
    }
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn draft() -> PostDraft {
        PostDraft {
            title: Some("A".to_string()),
            content: Some("B".to_string()),
            category: Some("技术".to_string()),
            author: Some("qin".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let post = Post::create(NewPost::try_from(draft()).unwrap());
        assert!(!post.id.is_empty());
        assert_eq!(post.likes, 0);
        assert_eq!(post.views, 0);
        assert!(post.comments.is_empty());
        assert_eq!(post.excerpt, "");
        assert!(post.created_at > 0);
    }

    #[test]
    fn test_create_keeps_supplied_id_and_timestamp() {
        let mut input = draft();
        input.id = Some("fixed".to_string());
        input.created_at = Some(42);
        let post = Post::create(NewPost::try_from(input).unwrap());
        assert_eq!(post.id, "fixed");
        assert_eq!(post.created_at, 42);
    }

    #[test]
    fn test_update_preserves_counters_and_comments() {
        let mut post = Post::create(NewPost::try_from(draft()).unwrap());
        post.like();
        post.views = 7;
        post.push_comment(NewComment::new("hi", None).unwrap());
        let created_at = post.created_at;

        let mut replacement = draft();
        replacement.title = Some("New".to_string());
        replacement.category = Some("生活".to_string());
        post.apply_update(PostUpdate::try_from(replacement).unwrap());

        assert_eq!(post.title, "New");
        assert_eq!(post.category, Category::Life);
        assert_eq!(post.likes, 1);
        assert_eq!(post.views, 7);
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.created_at, created_at);
    }

    #[test]
    fn test_serializes_camel_case() {
        let post = Post::create(NewPost::try_from(draft()).unwrap());
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("coverImage").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["category"], "技术");
    }
}
