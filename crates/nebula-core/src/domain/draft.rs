//! Post input schemas.
//!
//! [`PostDraft`] is what arrives over the wire; [`NewPost`] and
//! [`PostUpdate`] are the validated forms the stores accept.

use serde::{Deserialize, Serialize};

use super::Category;
use crate::error::DomainError;

/// Unvalidated post fields as submitted by a client.
///
/// Unknown fields (e.g. `likes` on a round-tripped post) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub author: Option<String>,
    pub created_at: Option<i64>,
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Validated full-replacement of a post's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author: String,
}

/// Fields shared by both validated forms.
struct Checked {
    title: String,
    excerpt: String,
    content: String,
    cover_image: String,
    category: Category,
    tags: Vec<String>,
    author: String,
}

impl PostDraft {
    fn check(self) -> Result<(Checked, Option<String>, Option<i64>), DomainError> {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        let missing: Vec<&str> = [
            ("title", present(&self.title)),
            ("content", present(&self.content)),
            ("category", present(&self.category)),
            ("author", present(&self.author)),
        ]
        .into_iter()
        .filter_map(|(name, ok)| (!ok).then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let category: Category = self.category.unwrap_or_default().parse()?;

        let id = match self.id {
            Some(id) if id.trim().is_empty() => None,
            other => other,
        };

        let tags = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let checked = Checked {
            title: self.title.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            cover_image: self.cover_image.unwrap_or_default(),
            category,
            tags,
            author: self.author.unwrap_or_default().trim().to_string(),
        };

        Ok((checked, id, self.created_at))
    }
}

impl TryFrom<PostDraft> for NewPost {
    type Error = DomainError;

    fn try_from(draft: PostDraft) -> Result<Self, Self::Error> {
        let (c, id, created_at) = draft.check()?;
        Ok(Self {
            id,
            title: c.title,
            excerpt: c.excerpt,
            content: c.content,
            cover_image: c.cover_image,
            category: c.category,
            tags: c.tags,
            author: c.author,
            created_at,
        })
    }
}

impl TryFrom<PostDraft> for PostUpdate {
    type Error = DomainError;

    fn try_from(draft: PostDraft) -> Result<Self, Self::Error> {
        let (c, _, _) = draft.check()?;
        Ok(Self {
            title: c.title,
            excerpt: c.excerpt,
            content: c.content,
            cover_image: c.cover_image,
            category: c.category,
            tags: c.tags,
            author: c.author,
        })
    }
}
