//! Error handling - every failure is rendered as the `{success: false, error}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use nebula_core::error::{DomainError, RepoError};
use nebula_core::ports::{AssistError, AuthError, SessionError};
use nebula_shared::ApiResponse;
use std::fmt;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    /// Server misconfiguration the client can do nothing about.
    Configuration(String),
    Internal(String),
    /// A backend is unreachable or a feature is switched off.
    Unavailable(String),
    BadGateway(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl AppError {
    /// Message placed in the envelope's `error` field.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Configuration(msg)
            | AppError::Unavailable(msg)
            | AppError::BadGateway(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(self.public_message()))
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::BadRequest(msg),
            RepoError::Unauthorized => AppError::Unauthorized,
            RepoError::Connection(msg) => {
                tracing::error!("Storage connection error: {}", msg);
                AppError::Unavailable("Storage unavailable".to_string())
            }
            RepoError::Query(msg) => AppError::Internal(format!("Storage query failed: {}", msg)),
            RepoError::Serialization(msg) => {
                AppError::Internal(format!("Stored data is corrupt: {}", msg))
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session store error: {}", err);
        AppError::Unavailable("Session store unavailable".to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured => {
                AppError::Configuration("Admin password is not configured".to_string())
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AssistError> for AppError {
    fn from(err: AssistError) -> Self {
        tracing::warn!("Assistant error: {}", err);
        AppError::BadGateway("AI service failed".to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
