// Wire-level tests for the Meilisearch client against a fake server

use crate::common::{FakeMeili, TEST_API_KEY};
use postsync::core::error::SyncStage;
use postsync::core::sync::{MeiliClient, SearchBackend, PRIMARY_KEY};
use postsync::core::types::{Document, IndexSettings};
use serde_json::json;
use std::time::Duration;

fn client(fake: &FakeMeili) -> MeiliClient {
    MeiliClient::new(&fake.url, TEST_API_KEY, Duration::from_millis(5)).unwrap()
}

fn doc(id: usize) -> Document {
    Document {
        id,
        slug: format!("/posts/p{id}/"),
        title: Some(format!("Post {id}")),
        description: "desc".to_string(),
        content: "body".to_string(),
        pub_date: 1_700_000_000_000,
    }
}

#[tokio::test]
async fn test_delete_absent_index_reports_false() {
    let fake = FakeMeili::start(TEST_API_KEY).await;

    let existed = client(&fake).delete_index_if_exists("posts").await.unwrap();

    assert!(!existed);
    assert_eq!(fake.requests(), vec!["DELETE /indexes/posts"]);
}

#[tokio::test]
async fn test_delete_existing_index() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.seed_index("posts", vec![json!({"id": 0})]);

    let existed = client(&fake).delete_index_if_exists("posts").await.unwrap();

    assert!(existed);
    assert!(!fake.has_index("posts"));
}

#[tokio::test]
async fn test_get_or_create_creates_with_primary_key() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    let client = client(&fake);

    client.get_or_create_index("posts", PRIMARY_KEY).await.unwrap();
    // Second call finds it
    client.get_or_create_index("posts", PRIMARY_KEY).await.unwrap();

    let index = fake.index("posts").unwrap();
    assert_eq!(index.primary_key.as_deref(), Some("id"));
    assert_eq!(
        fake.requests(),
        vec!["GET /indexes/posts", "POST /indexes", "GET /indexes/posts"]
    );
}

#[tokio::test]
async fn test_update_settings_sends_camel_case_lists() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    let client = client(&fake);
    client.get_or_create_index("posts", PRIMARY_KEY).await.unwrap();

    client
        .update_settings("posts", &IndexSettings::default())
        .await
        .unwrap();

    let settings = fake.index("posts").unwrap().settings.unwrap();
    assert_eq!(
        settings["searchableAttributes"],
        json!(["title", "description", "content"])
    );
    assert_eq!(
        settings["displayedAttributes"],
        json!(["title", "description", "slug", "pubDate", "content"])
    );
    assert_eq!(settings["sortableAttributes"], json!(["pubDate"]));
}

#[tokio::test]
async fn test_add_documents_uploads_batch() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    let client = client(&fake);

    client
        .add_documents("posts", &[doc(0), doc(1)], PRIMARY_KEY)
        .await
        .unwrap();

    let index = fake.index("posts").unwrap();
    assert_eq!(index.documents.len(), 2);
    assert_eq!(index.documents[1]["slug"], json!("/posts/p1/"));
    assert_eq!(index.documents[0]["pubDate"], json!(1_700_000_000_000i64));
    assert_eq!(index.primary_key.as_deref(), Some("id"));
}

#[tokio::test]
async fn test_failed_upload_task_is_service_error() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.set_fail_uploads(true);

    let err = client(&fake)
        .add_documents("posts", &[doc(0)], PRIMARY_KEY)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(SyncStage::Upload));
    assert!(err.message().contains("invalid_document_fields"));
}

#[tokio::test]
async fn test_http_error_is_service_error() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.set_reject_deletes(true);

    let err = client(&fake)
        .delete_index_if_exists("posts")
        .await
        .unwrap_err();

    assert!(err.is_service());
    assert_eq!(err.stage(), Some(SyncStage::Delete));
}

#[tokio::test]
async fn test_wrong_api_key_rejected() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    let client = MeiliClient::new(&fake.url, "wrong", Duration::from_millis(5)).unwrap();

    let err = client.delete_index_if_exists("posts").await.unwrap_err();

    assert!(err.is_service());
    assert!(err.message().contains("invalid_api_key"));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_service_error() {
    // Nothing listens on port 1
    let client = MeiliClient::new("http://127.0.0.1:1", TEST_API_KEY, Duration::from_millis(5))
        .unwrap();

    let err = client.delete_index_if_exists("posts").await.unwrap_err();

    assert_eq!(err.stage(), Some(SyncStage::Delete));
}
