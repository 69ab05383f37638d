use blog_core::{DEFAULT_LATEST_COUNT, PostRepository};
use blog_firestore::{FirestoreConfig, FirestoreStore};

fn store_from_env() -> FirestoreStore {
    let project = std::env::var("FIRESTORE_PROJECT_ID").unwrap_or_else(|_| "demo-blog".to_string());
    let base_url =
        std::env::var("FIRESTORE_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let mut config = FirestoreConfig::new(project).with_base_url(base_url);
    if let Ok(key) = std::env::var("FIRESTORE_API_KEY") {
        config = config.with_api_key(key);
    }
    FirestoreStore::new(config).expect("config must be valid")
}

#[tokio::test]
#[ignore = "requires running Firestore emulator"]
async fn emulator_smoke_flow() {
    let repo = PostRepository::new(store_from_env());

    let posts = repo
        .fetch_published_posts()
        .await
        .expect("listing must succeed");
    assert!(posts.iter().all(|post| post.is_published));
    assert!(posts.windows(2).all(|pair| pair[0].published_at >= pair[1].published_at || pair[1].published_at.is_none()));

    let latest = repo.fetch_latest_posts(DEFAULT_LATEST_COUNT).await;
    assert!(latest.len() <= 3);

    if let Some(first) = posts.first() {
        let fetched = repo
            .fetch_post_by_id(&first.id)
            .await
            .expect("lookup must succeed");
        assert_eq!(fetched.map(|post| post.id), Some(first.id.clone()));
    }

    let missing = repo
        .fetch_post_by_id("definitely-missing-post")
        .await
        .expect("lookup must succeed");
    assert!(missing.is_none());
}
