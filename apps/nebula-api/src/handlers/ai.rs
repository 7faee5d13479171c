//! AI writing-assistant endpoints.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use nebula_core::ports::{ContentAssistant, TitleSuggestion};
use nebula_shared::ApiResponse;
use nebula_shared::dto::{AssistRequest, SummaryResponse};

use crate::middleware::{AdminSession, AppError, AppResult};
use crate::state::AppState;

fn assistant(state: &AppState) -> AppResult<Arc<dyn ContentAssistant>> {
    state
        .assistant
        .clone()
        .ok_or_else(|| AppError::Unavailable("AI features are not configured".to_string()))
}

fn content(body: web::Json<AssistRequest>) -> AppResult<String> {
    let content = body.into_inner().content;
    if content.trim().is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }
    Ok(content)
}

/// POST /api/ai/summary
pub async fn summarize(
    state: web::Data<AppState>,
    body: web::Json<AssistRequest>,
) -> AppResult<HttpResponse> {
    let assistant = assistant(&state)?;
    let content = content(body)?;

    let summary = assistant.summarize(&content).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(SummaryResponse { summary })))
}

/// Suggest a title and tags for a draft. Model failures yield a neutral default.
///
/// POST /api/ai/title-tags
pub async fn title_and_tags(
    _admin: AdminSession,
    state: web::Data<AppState>,
    body: web::Json<AssistRequest>,
) -> AppResult<HttpResponse> {
    let assistant = assistant(&state)?;
    let content = content(body)?;

    let suggestion = match assistant.suggest_title_and_tags(&content).await {
        Ok(suggestion) => suggestion,
        Err(e) => {
            tracing::warn!(error = %e, "Title suggestion failed, using fallback");
            TitleSuggestion::fallback()
        }
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(suggestion)))
}
