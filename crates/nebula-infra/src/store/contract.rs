//! Behaviour every `PostStore` backend must share.
//!
//! `run_all` expects an empty store and leaves it empty.

use std::sync::Arc;

use nebula_core::domain::{Category, NewComment, NewPost, PostDraft, PostFilter, PostUpdate};
use nebula_core::error::RepoError;
use nebula_core::ports::PostStore;

pub(crate) fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: Some(title.to_string()),
        content: Some("B".to_string()),
        category: Some("技术".to_string()),
        author: Some("qin".to_string()),
        ..Default::default()
    }
}

pub(crate) fn new_post(title: &str) -> NewPost {
    NewPost::try_from(draft(title)).unwrap()
}

fn new_post_with(title: &str, category: &str, excerpt: &str, tags: &[&str], at: i64) -> NewPost {
    let mut d = draft(title);
    d.category = Some(category.to_string());
    d.excerpt = Some(excerpt.to_string());
    d.tags = Some(tags.iter().map(|t| t.to_string()).collect());
    d.created_at = Some(at);
    NewPost::try_from(d).unwrap()
}

fn comment(content: &str, author: &str) -> NewComment {
    NewComment::new(content, Some(author.to_string())).unwrap()
}

pub(crate) async fn run_all(store: &dyn PostStore) {
    scenario(store).await;
    create_assigns_defaults(store).await;
    round_trip(store).await;
    duplicate_id_conflicts(store).await;
    list_filters(store).await;
    update_preserves_counters(store).await;
    comments_append_in_order(store).await;
    missing_ids_are_not_faults(store).await;

    let left = store.list_posts(&PostFilter::default()).await.unwrap();
    assert!(left.is_empty(), "contract checks must clean up");
}

async fn scenario(store: &dyn PostStore) {
    let post = store.create_post(new_post("A")).await.unwrap();
    assert!(!post.id.is_empty());
    assert_eq!(post.likes, 0);

    store.increment_likes(&post.id).await.unwrap().unwrap();
    let liked = store.increment_likes(&post.id).await.unwrap().unwrap();
    assert_eq!(liked.likes, 2);

    let commented = store
        .add_comment(&post.id, comment("nice", "bob"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(commented.comments.len(), 1);
    assert_eq!(commented.comments[0].author, "bob");
    assert_eq!(commented.comments[0].content, "nice");

    assert!(store.delete_post(&post.id).await.unwrap());
    assert_eq!(store.get_post(&post.id).await.unwrap(), None);
}

async fn create_assigns_defaults(store: &dyn PostStore) {
    let a = store.create_post(new_post("one")).await.unwrap();
    let b = store.create_post(new_post("two")).await.unwrap();

    assert_ne!(a.id, b.id);
    for p in [&a, &b] {
        assert_eq!(p.likes, 0);
        assert_eq!(p.views, 0);
        assert!(p.comments.is_empty());
    }

    store.delete_post(&a.id).await.unwrap();
    store.delete_post(&b.id).await.unwrap();
}

async fn round_trip(store: &dyn PostStore) {
    let input = new_post_with("Round", "设计", "short", &["x", "y"], 1_700_000_000_000);
    let created = store.create_post(input.clone()).await.unwrap();
    let fetched = store.get_post(&created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.title, input.title);
    assert_eq!(fetched.excerpt, input.excerpt);
    assert_eq!(fetched.content, input.content);
    assert_eq!(fetched.category, Category::Design);
    assert_eq!(fetched.tags, input.tags);
    assert_eq!(fetched.author, input.author);
    assert_eq!(fetched.created_at, 1_700_000_000_000);

    store.delete_post(&created.id).await.unwrap();
}

async fn duplicate_id_conflicts(store: &dyn PostStore) {
    let mut d = draft("first");
    d.id = Some("fixed-id".to_string());
    let first = store
        .create_post(NewPost::try_from(d.clone()).unwrap())
        .await
        .unwrap();
    assert_eq!(first.id, "fixed-id");

    d.title = Some("second".to_string());
    let err = store
        .create_post(NewPost::try_from(d).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    let kept = store.get_post("fixed-id").await.unwrap().unwrap();
    assert_eq!(kept.title, "first");
    store.delete_post("fixed-id").await.unwrap();
}

async fn list_filters(store: &dyn PostStore) {
    let posts = [
        new_post_with("Learning Rust", "技术", "", &[], 1),
        new_post_with("Weekend", "生活", "a FOO day", &[], 2),
        new_post_with("Palettes", "设计", "", &["Foo-colors"], 3),
        new_post_with("Notes", "技术", "", &["misc"], 4),
    ];
    let mut ids = Vec::new();
    for p in posts {
        ids.push(store.create_post(p).await.unwrap().id);
    }

    let all = store.list_posts(&PostFilter::default()).await.unwrap();
    let order: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(order, vec!["Notes", "Palettes", "Weekend", "Learning Rust"]);

    let tech = PostFilter::parse(Some("技术"), None);
    let result = store.list_posts(&tech).await.unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|p| p.category == Category::Tech));

    let sentinel = PostFilter::parse(Some("all"), None);
    assert_eq!(store.list_posts(&sentinel).await.unwrap().len(), 4);

    let foo = PostFilter::parse(None, Some("foo"));
    let titles: Vec<_> = store
        .list_posts(&foo)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Palettes", "Weekend"]);

    let rust = PostFilter::parse(None, Some("RUST"));
    assert_eq!(store.list_posts(&rust).await.unwrap().len(), 1);

    let none = PostFilter::parse(Some("生活"), Some("rust"));
    assert!(store.list_posts(&none).await.unwrap().is_empty());

    let unknown = PostFilter::parse(Some("tech"), None);
    assert!(store.list_posts(&unknown).await.unwrap().is_empty());

    for id in ids {
        store.delete_post(&id).await.unwrap();
    }
}

async fn update_preserves_counters(store: &dyn PostStore) {
    let post = store.create_post(new_post("before")).await.unwrap();
    store.increment_likes(&post.id).await.unwrap();
    store
        .add_comment(&post.id, comment("first!", "ann"))
        .await
        .unwrap();

    let mut replacement = draft("after");
    replacement.tags = Some(vec!["new".to_string()]);
    replacement.category = Some("随笔".to_string());
    let update = PostUpdate::try_from(replacement).unwrap();

    let updated = store.update_post(&post.id, update).await.unwrap().unwrap();
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.title, "after");
    assert_eq!(updated.category, Category::Essay);
    assert_eq!(updated.tags, vec!["new".to_string()]);
    assert_eq!(updated.likes, 1);
    assert_eq!(updated.comments.len(), 1);
    assert_eq!(updated.created_at, post.created_at);

    let fetched = store.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);

    store.delete_post(&post.id).await.unwrap();
}

async fn comments_append_in_order(store: &dyn PostStore) {
    let post = store.create_post(new_post("thread")).await.unwrap();
    store
        .add_comment(&post.id, comment("one", "a"))
        .await
        .unwrap();
    let after = store
        .add_comment(&post.id, comment("two", "b"))
        .await
        .unwrap()
        .unwrap();

    let contents: Vec<_> = after.comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two"]);
    assert_ne!(after.comments[0].id, after.comments[1].id);

    store.delete_post(&post.id).await.unwrap();
}

async fn missing_ids_are_not_faults(store: &dyn PostStore) {
    let existing = store.create_post(new_post("untouched")).await.unwrap();

    assert_eq!(store.get_post("missing").await.unwrap(), None);
    assert!(!store.delete_post("missing").await.unwrap());
    assert_eq!(store.increment_likes("missing").await.unwrap(), None);
    assert_eq!(
        store
            .add_comment("missing", comment("hi", "x"))
            .await
            .unwrap(),
        None
    );
    let update = PostUpdate::try_from(draft("x")).unwrap();
    assert_eq!(store.update_post("missing", update).await.unwrap(), None);

    let all = store.list_posts(&PostFilter::default()).await.unwrap();
    assert_eq!(all, vec![existing.clone()]);

    store.delete_post(&existing.id).await.unwrap();
}

/// Fire `n` likes at one post concurrently and check none were lost.
pub(crate) async fn concurrent_likes<S>(store: Arc<S>, n: u64)
where
    S: PostStore + 'static,
{
    let post = store.create_post(new_post("popular")).await.unwrap();

    let handles: Vec<_> = (0..n)
        .map(|_| {
            let store = store.clone();
            let id = post.id.clone();
            tokio::spawn(async move { store.increment_likes(&id).await })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.unwrap().unwrap().unwrap();
    }

    let final_post = store.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(final_post.likes, n);
}
