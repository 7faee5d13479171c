use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use uuid::Uuid;

use super::post::now_millis;
use crate::error::DomainError;

/// Author name used when a commenter leaves it empty.
pub const GUEST_AUTHOR: &str = "Guest";

/// Comment entity - always embedded in exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub created_at: i64,
}

impl Comment {
    /// Build a comment with a fresh id, avatar and timestamp.
    pub fn new(input: NewComment) -> Self {
        let avatar = avatar_url(&input.author);
        Self {
            id: Uuid::new_v4().to_string(),
            author: input.author,
            avatar,
            content: input.content,
            created_at: now_millis(),
        }
    }
}

/// Avatar image URL derived from the author name.
pub fn avatar_url(author: &str) -> String {
    let name: String = form_urlencoded::byte_serialize(author.as_bytes()).collect();
    format!(
        "https://ui-avatars.com/api/?name={}&size=80&background=random&color=fff&bold=true&format=svg",
        name
    )
}

/// Validated input for appending a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub author: String,
}

impl NewComment {
    /// Blank content is rejected; a blank or missing author becomes [`GUEST_AUTHOR`].
    pub fn new(content: impl Into<String>, author: Option<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Comment content must not be empty".to_string(),
            ));
        }

        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| GUEST_AUTHOR.to_string());

        Ok(Self { content, author })
    }
}
