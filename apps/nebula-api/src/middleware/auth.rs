//! Admin session extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::Future;
use std::pin::Pin;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Proof that the request carries an active admin session.
///
/// Use this in handlers to require the admin:
/// ```ignore
/// async fn delete_post(_admin: AdminSession, path: web::Path<String>) -> AppResult<HttpResponse> {
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

/// The token from `Authorization: Bearer <token>`, if present and well formed.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                AppError::Internal("AppState not found in app data".to_string())
            })?;
            let token = token.ok_or(AppError::Unauthorized)?;

            if state.sessions.is_active(&token).await? {
                Ok(AdminSession { token })
            } else {
                tracing::debug!("Rejected request with unknown or expired session");
                Err(AppError::Unauthorized)
            }
        })
    }
}

/// Optional admin session - doesn't fail if the caller is anonymous.
pub struct OptionalAdminSession(pub Option<AdminSession>);

impl FromRequest for OptionalAdminSession {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = AdminSession::from_request(req, payload);
        Box::pin(async move {
            match inner.await {
                Ok(session) => Ok(OptionalAdminSession(Some(session))),
                Err(AppError::Unauthorized) => Ok(OptionalAdminSession(None)),
                Err(e) => Err(e),
            }
        })
    }
}
