#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use nebula_api::AppState;
use nebula_core::ports::{AssistError, ContentAssistant, TitleSuggestion};
use nebula_infra::{Argon2AdminGate, InMemoryKeyValueStore, InMemoryPostStore, KeyValueSessionStore};

pub const ADMIN_PASSWORD: &str = "correct horse";

/// Canned assistant; `broken` makes every call fail upstream.
pub struct StubAssistant {
    pub broken: bool,
}

#[async_trait]
impl ContentAssistant for StubAssistant {
    async fn summarize(&self, content: &str) -> Result<String, AssistError> {
        if self.broken {
            return Err(AssistError::Upstream("quota exceeded".to_string()));
        }
        Ok(format!("Summary of {} chars", content.chars().count()))
    }

    async fn suggest_title_and_tags(&self, _content: &str) -> Result<TitleSuggestion, AssistError> {
        if self.broken {
            return Err(AssistError::InvalidResponse("not json".to_string()));
        }
        Ok(TitleSuggestion {
            title: "Borrowing Without Tears".to_string(),
            tags: vec!["rust".to_string(), "ownership".to_string()],
        })
    }
}

pub fn state_with(password: Option<&str>, assistant: Option<StubAssistant>) -> AppState {
    let sessions = KeyValueSessionStore::new(
        Arc::new(InMemoryKeyValueStore::new()),
        Duration::from_secs(3600),
    );
    let gate = Argon2AdminGate::new(password).unwrap();

    AppState::new(
        Arc::new(InMemoryPostStore::new()),
        Arc::new(sessions),
        Arc::new(gate),
        assistant.map(|a| Arc::new(a) as Arc<dyn ContentAssistant>),
    )
}

pub fn test_state() -> AppState {
    state_with(Some(ADMIN_PASSWORD), Some(StubAssistant { broken: false }))
}

pub fn post_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "excerpt": format!("About {}", title),
        "content": format!("# {}\n\nBody text.", title),
        "coverImage": "https://picsum.photos/800/400",
        "category": category,
        "tags": ["rust", "web"],
        "author": "qin"
    })
}
