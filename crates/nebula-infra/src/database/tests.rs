use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;

use nebula_core::domain::{Category, NewComment, PostFilter};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;

use super::PostgresPostStore;
use super::entity::post;

fn model(id: &str, likes: i64, comments: serde_json::Value) -> post::Model {
    post::Model {
        id: id.to_owned(),
        title: "Test Post".to_owned(),
        excerpt: "Excerpt".to_owned(),
        content: "Content".to_owned(),
        cover_image: String::new(),
        category: "技术".to_owned(),
        tags: json!(["rust"]),
        author: "qin".to_owned(),
        created_at: 1_700_000_000_000,
        likes,
        views: 0,
        comments,
    }
}

#[tokio::test]
async fn test_get_post_maps_model() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("p1", 4, json!([]))]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let post = store.get_post("p1").await.unwrap().unwrap();

    assert_eq!(post.id, "p1");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.category, Category::Tech);
    assert_eq!(post.tags, vec!["rust".to_string()]);
    assert_eq!(post.likes, 4);
}

#[tokio::test]
async fn test_get_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    assert_eq!(store.get_post("nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_reports_missing_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let store = PostgresPostStore::new(db);
    assert!(store.delete_post("p1").await.unwrap());
    assert!(!store.delete_post("p1").await.unwrap());
}

#[tokio::test]
async fn test_increment_likes_returns_updated_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("p1", 3, json!([]))]])
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let liked = store.increment_likes("p1").await.unwrap().unwrap();
    assert_eq!(liked.likes, 3);

    assert_eq!(store.increment_likes("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_add_comment_decodes_comment_column() {
    let stored = json!([{
        "id": "c1",
        "author": "bob",
        "avatar": "https://ui-avatars.com/api/?name=bob",
        "content": "nice",
        "createdAt": 1
    }]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("p1", 0, stored)]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let comment = NewComment::new("nice", Some("bob".to_string())).unwrap();
    let post = store.add_comment("p1", comment).await.unwrap().unwrap();

    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].author, "bob");
}

#[tokio::test]
async fn test_list_posts_rejects_corrupt_rows() {
    let mut bad = model("p2", 0, json!([]));
    bad.category = "sports".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("p1", 0, json!([])), bad]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let filter = PostFilter::parse(Some("技术"), Some("test"));
    assert!(matches!(
        store.list_posts(&filter).await,
        Err(RepoError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_unknown_category_lists_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let store = PostgresPostStore::new(db);
    let filter = PostFilter::parse(Some("tech"), None);
    assert!(store.list_posts(&filter).await.unwrap().is_empty());
}
