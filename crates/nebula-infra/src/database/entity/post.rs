//! Post entity for SeaORM. Tags and comments live in JSONB columns.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use nebula_core::domain::{Comment, Post};
use nebula_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover_image: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub author: String,
    pub created_at: i64,
    pub likes: i64,
    pub views: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let category = model
            .category
            .parse()
            .map_err(|e: nebula_core::DomainError| RepoError::Serialization(e.to_string()))?;
        let tags: Vec<String> = serde_json::from_value(model.tags)?;
        let comments: Vec<Comment> = serde_json::from_value(model.comments)?;

        Ok(Self {
            id: model.id,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            cover_image: model.cover_image,
            category,
            tags,
            author: model.author,
            created_at: model.created_at,
            likes: u64::try_from(model.likes).unwrap_or_default(),
            views: u64::try_from(model.views).unwrap_or_default(),
            comments,
        })
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl TryFrom<Post> for ActiveModel {
    type Error = RepoError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(post.id),
            title: Set(post.title),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            cover_image: Set(post.cover_image),
            category: Set(post.category.as_str().to_string()),
            tags: Set(serde_json::to_value(&post.tags)?),
            author: Set(post.author),
            created_at: Set(post.created_at),
            likes: Set(i64::try_from(post.likes).unwrap_or(i64::MAX)),
            views: Set(i64::try_from(post.views).unwrap_or(i64::MAX)),
            comments: Set(serde_json::to_value(&post.comments)?),
        })
    }
}
