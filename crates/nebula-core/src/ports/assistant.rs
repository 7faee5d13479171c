//! AI writing-assistant port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Suggested title and tags for a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSuggestion {
    pub title: String,
    pub tags: Vec<String>,
}

impl TitleSuggestion {
    /// Returned when the model gives nothing usable.
    pub fn fallback() -> Self {
        Self {
            title: "Untitled Post".to_string(),
            tags: vec!["General".to_string()],
        }
    }
}

#[async_trait]
pub trait ContentAssistant: Send + Sync {
    /// A short paragraph summarizing the post body.
    async fn summarize(&self, content: &str) -> Result<String, AssistError>;

    async fn suggest_title_and_tags(&self, content: &str) -> Result<TitleSuggestion, AssistError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("Assistant request failed: {0}")]
    Upstream(String),

    #[error("Assistant returned an unusable response: {0}")]
    InvalidResponse(String),
}
