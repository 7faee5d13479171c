//! Content assistant backed by the Gemini `generateContent` REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nebula_core::ports::{AssistError, ContentAssistant, TitleSuggestion};

const API_ROOT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SUMMARY_INPUT_CHARS: usize = 5000;
const TITLE_INPUT_CHARS: usize = 2000;

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY` (or `API_KEY`). Returns `None` when neither is set.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())?;

        Some(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            timeout: Duration::from_secs(30),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Gemini-backed [`ContentAssistant`].
pub struct GeminiAssistant {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiAssistant {
    pub fn new(config: GeminiConfig) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistError::Upstream(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn generate(&self, prompt: String, json_output: bool) -> Result<String, AssistError> {
        let url = format!("{}/{}:generateContent", API_ROOT, self.config.model);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: json_output.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Upstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AssistError::Upstream(format!("Gemini returned {}", status)));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AssistError::InvalidResponse(e.to_string()))?;

        response_text(parsed)
    }
}

fn response_text(resp: GenerateResponse) -> Result<String, AssistError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AssistError::InvalidResponse("Empty response".to_string()));
    }
    Ok(text)
}

/// First `max` characters of `content`, on a char boundary.
fn truncate_chars(content: &str, max: usize) -> &str {
    match content.char_indices().nth(max) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

fn parse_title_suggestion(text: &str) -> Result<TitleSuggestion, AssistError> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed).map_err(|e| AssistError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl ContentAssistant for GeminiAssistant {
    async fn summarize(&self, content: &str) -> Result<String, AssistError> {
        let prompt = format!(
            "Summarize the following blog post content into a concise, engaging paragraph of about 3 sentences. Content: {}",
            truncate_chars(content, SUMMARY_INPUT_CHARS)
        );
        let summary = self.generate(prompt, false).await?;
        Ok(summary.trim().to_string())
    }

    async fn suggest_title_and_tags(&self, content: &str) -> Result<TitleSuggestion, AssistError> {
        let prompt = format!(
            "Based on the following content, generate a catchy, short title and 3 relevant tags. Return strictly valid JSON.\n\
             Content: {}\n\
             Schema: {{ \"title\": \"string\", \"tags\": [\"string\", \"string\", \"string\"] }}",
            truncate_chars(content, TITLE_INPUT_CHARS)
        );
        let text = self.generate(prompt, true).await?;
        parse_title_suggestion(&text)
    }
}
