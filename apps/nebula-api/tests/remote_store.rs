//! Drives a live server through the HTTP-backed post store.

mod common;

use actix_web::{App, HttpServer, web};

use common::{ADMIN_PASSWORD, test_state};
use nebula_api::handlers::configure_routes;
use nebula_core::domain::{Category, NewComment, NewPost, PostDraft, PostFilter, PostUpdate};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;
use nebula_infra::{HttpPostStore, RemoteConfig};

fn draft(title: &str, category: &str) -> PostDraft {
    PostDraft {
        title: Some(title.to_string()),
        excerpt: Some(format!("About {}", title)),
        content: Some("Body".to_string()),
        category: Some(category.to_string()),
        tags: Some(vec!["remote".to_string()]),
        author: Some("qin".to_string()),
        ..Default::default()
    }
}

#[actix_rt::test]
async fn test_remote_store_against_live_server() {
    let state = test_state();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| configure_routes(cfg, "/blog"))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    let base_url = format!("http://{}/blog/api", addr);
    let anonymous = HttpPostStore::new(RemoteConfig::new(base_url.clone())).unwrap();

    // Writes need a session.
    let input = NewPost::try_from(draft("Unauthorized", "技术")).unwrap();
    assert!(matches!(
        anonymous.create_post(input).await,
        Err(RepoError::Unauthorized)
    ));
    assert!(matches!(
        anonymous.login("wrong").await,
        Err(RepoError::Unauthorized)
    ));

    let session = anonymous.login(ADMIN_PASSWORD).await.unwrap();
    assert_eq!(session.token_type, "Bearer");
    let store = HttpPostStore::new(RemoteConfig::new(base_url))
        .unwrap()
        .with_admin_token(session.token);

    let created = store
        .create_post(NewPost::try_from(draft("Remote Rust", "技术")).unwrap())
        .await
        .unwrap();
    store
        .create_post(NewPost::try_from(draft("Remote Life", "生活")).unwrap())
        .await
        .unwrap();

    let fetched = store.get_post(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(store.get_post("missing").await.unwrap(), None);

    let filter = PostFilter::parse(Some("技术"), None);
    let tech = store.list_posts(&filter).await.unwrap();
    assert_eq!(tech.len(), 1);
    assert_eq!(tech[0].category, Category::Tech);

    let liked = store.increment_likes(&created.id).await.unwrap().unwrap();
    assert_eq!(liked.likes, 1);

    let comment = NewComment::new("Nice", Some("bob".to_string())).unwrap();
    let commented = store.add_comment(&created.id, comment).await.unwrap().unwrap();
    assert_eq!(commented.comments[0].author, "bob");

    let update = PostUpdate::try_from(draft("Remote Rust 2", "技术")).unwrap();
    let updated = store.update_post(&created.id, update).await.unwrap().unwrap();
    assert_eq!(updated.title, "Remote Rust 2");
    assert_eq!(updated.likes, 1);
    assert_eq!(updated.comments.len(), 1);

    assert!(store.delete_post(&created.id).await.unwrap());
    assert!(!store.delete_post(&created.id).await.unwrap());
    assert_eq!(store.increment_likes(&created.id).await.unwrap(), None);

    handle.stop(true).await;
}
