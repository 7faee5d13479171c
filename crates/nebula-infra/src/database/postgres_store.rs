//! PostgreSQL implementation of the post store.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use nebula_core::domain::{
    CategoryFilter, Comment, NewComment, NewPost, Post, PostFilter, PostUpdate,
};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;

use super::entity::post::{self, ActiveModel, Entity as PostEntity};

/// Post store over a `posts` table.
///
/// Likes and comments are changed with single UPDATE statements
/// (`likes + 1`, `comments || $1`), so concurrent writers to one row are
/// serialized by the database.
pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn first(models: Vec<post::Model>) -> Result<Option<Post>, RepoError> {
        models.into_iter().next().map(Post::try_from).transpose()
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        DbErr::ConnectionAcquire(err) => RepoError::Connection(err.to_string()),
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                RepoError::Conflict("Post already exists".to_string())
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

/// Escape LIKE wildcards so the search text matches literally.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl PostStore for PostgresPostStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        match &filter.category {
            Some(CategoryFilter::Known(category)) => {
                query = query.filter(post::Column::Category.eq(category.as_str()));
            }
            // No stored row can carry a label outside the closed set.
            Some(CategoryFilter::Unknown(_)) => return Ok(Vec::new()),
            None => {}
        }

        if let Some(search) = &filter.search {
            query = query.filter(Expr::cust_with_values(
                "(title ILIKE $1 OR excerpt ILIKE $1 OR EXISTS \
                 (SELECT 1 FROM jsonb_array_elements_text(tags) AS tag WHERE tag ILIKE $1))",
                [like_pattern(search)],
            ));
        }

        let models = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        models.into_iter().map(Post::try_from).collect()
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, RepoError> {
        PostEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(Post::try_from)
            .transpose()
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, RepoError> {
        let active: ActiveModel = Post::create(input).try_into()?;
        let model = active.insert(&self.db).await.map_err(query_error)?;

        tracing::debug!(post_id = %model.id, "Post inserted");
        Post::try_from(model)
    }

    async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Option<Post>, RepoError> {
        let tags = serde_json::to_value(&update.tags)?;

        let models = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(update.title))
            .col_expr(post::Column::Excerpt, Expr::value(update.excerpt))
            .col_expr(post::Column::Content, Expr::value(update.content))
            .col_expr(post::Column::CoverImage, Expr::value(update.cover_image))
            .col_expr(
                post::Column::Category,
                Expr::value(update.category.as_str().to_string()),
            )
            .col_expr(post::Column::Tags, Expr::value(tags))
            .col_expr(post::Column::Author, Expr::value(update.author))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        Self::first(models)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let models = PostEntity::update_many()
            .col_expr(post::Column::Likes, Expr::col(post::Column::Likes).add(1))
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        Self::first(models)
    }

    async fn add_comment(
        &self,
        id: &str,
        comment: NewComment,
    ) -> Result<Option<Post>, RepoError> {
        let appended = serde_json::to_value([Comment::new(comment)])?;

        let models = PostEntity::update_many()
            .col_expr(
                post::Column::Comments,
                Expr::cust_with_values("comments || $1::jsonb", [appended]),
            )
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        Self::first(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("rust"), "%rust%");
    }
}
