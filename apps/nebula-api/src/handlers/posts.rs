//! Post endpoints.

use actix_web::{HttpResponse, web};

use nebula_core::domain::{NewComment, NewPost, PostDraft, PostFilter, PostUpdate};
use nebula_core::error::DomainError;
use nebula_shared::ApiResponse;
use nebula_shared::dto::{CommentRequest, DeletedResponse, ListPostsQuery};

use crate::middleware::{AdminSession, AppResult};
use crate::state::AppState;

/// List posts, newest first.
///
/// GET /api/posts?category=技术&search=rust
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter::parse(query.category.as_deref(), query.search.as_deref());
    let posts = state.posts.list_posts(&filter).await?;

    tracing::debug!(count = posts.len(), "Listed posts");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get_post(&id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// Create a post.
///
/// POST /api/posts
pub async fn create_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let input = NewPost::try_from(body.into_inner())?;
    let post = state.posts.create_post(input).await?;

    tracing::info!(post_id = %post.id, category = %post.category, "Post created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// Replace a post's editable fields. Counters and comments are kept.
///
/// PUT /api/posts/{id}
pub async fn update_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let update = PostUpdate::try_from(body.into_inner())?;
    let post = state
        .posts
        .update_post(&id, update)
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.posts.delete_post(&id).await? {
        return Err(DomainError::post_not_found(&id).into());
    }

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletedResponse { id })))
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .increment_likes(&id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// Append a comment. Anonymous commenters are shown as "Guest".
///
/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let CommentRequest { content, author } = body.into_inner();
    let comment = NewComment::new(content.unwrap_or_default(), author)?;

    let post = state
        .posts
        .add_comment(&id, comment)
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    tracing::info!(post_id = %post.id, comments = post.comments.len(), "Comment added");
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}
