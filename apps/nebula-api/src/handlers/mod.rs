//! HTTP handlers and route configuration.

mod ai;
mod auth;
mod health;
mod posts;

use actix_web::{Error, HttpRequest, HttpResponse, web};
use nebula_shared::ApiResponse;

use crate::middleware::AppError;

fn json_error(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(format!("Invalid query string: {}", err)).into()
}

fn path_error(err: actix_web::error::PathError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(format!("Invalid path: {}", err)).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::failure("Route not found"))
}

/// Configure all application routes under `{base_path}/api`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, base_path: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope(&format!("{}/api", base_path))
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post))
                        .route("/{id}/like", web::post().to(posts::like_post))
                        .route("/{id}/comments", web::post().to(posts::add_comment)),
                )
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout))
                        .route("/session", web::get().to(auth::session_status)),
                )
                .service(
                    web::scope("/ai")
                        .route("/summary", web::post().to(ai::summarize))
                        .route("/title-tags", web::post().to(ai::title_and_tags)),
                ),
        )
        .default_service(web::to(not_found));
}
