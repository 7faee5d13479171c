//! Admin login endpoints.

use actix_web::{HttpResponse, web};

use nebula_shared::ApiResponse;
use nebula_shared::dto::{LoginRequest, LoginResponse, SessionStatus};

use crate::middleware::{AdminSession, AppError, AppResult, OptionalAdminSession};
use crate::state::AppState;

/// Exchange the admin password for a session token.
///
/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let password = body.into_inner().password.unwrap_or_default();
    if password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    if !state.gate.verify(&password)? {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized);
    }

    let session = state.sessions.open().await?;
    let response = LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.ttl.as_secs(),
    };

    tracing::info!("Admin logged in");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// POST /api/auth/logout
pub async fn logout(
    admin: AdminSession,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state.sessions.close(&admin.token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(SessionStatus { is_admin: false })))
}

/// Whether the caller's token is an active admin session.
///
/// GET /api/auth/session
pub async fn session_status(session: OptionalAdminSession) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(SessionStatus {
        is_admin: session.0.is_some(),
    }))
}
