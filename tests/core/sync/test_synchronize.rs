// End-to-end rebuild protocol against the fake server

use crate::common::{FakeMeili, TEST_API_KEY};
use postsync::core::error::SyncStage;
use postsync::core::sync::{IndexSynchronizer, MeiliClient};
use postsync::core::types::{Document, IndexSettings, SyncState};
use serde_json::json;
use std::time::Duration;

fn synchronizer(fake: &FakeMeili) -> IndexSynchronizer<MeiliClient> {
    let client = MeiliClient::new(&fake.url, TEST_API_KEY, Duration::from_millis(5)).unwrap();
    IndexSynchronizer::new(client, "posts")
}

fn docs(n: usize) -> Vec<Document> {
    (0..n)
        .map(|id| Document {
            id,
            slug: format!("/posts/p{id}/"),
            title: if id == 0 { None } else { Some(format!("Post {id}")) },
            description: String::new(),
            content: format!("body {id}"),
            pub_date: 0,
        })
        .collect()
}

#[tokio::test]
async fn test_rebuild_replaces_stale_documents() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.seed_index(
        "posts",
        vec![json!({"id": 7, "slug": "/posts/removed/"})],
    );

    let report = synchronizer(&fake)
        .synchronize(&docs(3), &IndexSettings::default())
        .await
        .unwrap();

    assert_eq!(report.state, SyncState::Done);
    assert!(report.previous_index_existed);
    assert_eq!(report.documents_uploaded, 3);

    let index = fake.index("posts").unwrap();
    let ids: Vec<_> = index.documents.iter().map(|d| d["id"].clone()).collect();
    assert_eq!(ids, vec![json!(0), json!(1), json!(2)]);
    assert!(index.documents[0].get("title").is_none());
    assert!(index.settings.is_some());

    assert_eq!(
        fake.requests(),
        vec![
            "DELETE /indexes/posts",
            "GET /indexes/posts",
            "POST /indexes",
            "PATCH /indexes/posts/settings",
            "POST /indexes/posts/documents",
        ]
    );
}

#[tokio::test]
async fn test_empty_sync_leaves_index_absent() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.seed_index("posts", vec![json!({"id": 0})]);

    let report = synchronizer(&fake)
        .synchronize(&[], &IndexSettings::default())
        .await
        .unwrap();

    assert_eq!(report.state, SyncState::DoneEmpty);
    assert!(report.previous_index_existed);
    assert!(!fake.has_index("posts"));
    assert_eq!(fake.requests(), vec!["DELETE /indexes/posts"]);
}

#[tokio::test]
async fn test_first_run_on_fresh_service() {
    let fake = FakeMeili::start(TEST_API_KEY).await;

    let report = synchronizer(&fake)
        .synchronize(&docs(1), &IndexSettings::default())
        .await
        .unwrap();

    assert!(!report.previous_index_existed);
    assert_eq!(fake.index("posts").unwrap().documents.len(), 1);
}

#[tokio::test]
async fn test_delete_failure_makes_no_further_calls() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.set_reject_deletes(true);

    let err = synchronizer(&fake)
        .synchronize(&docs(2), &IndexSettings::default())
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(SyncStage::Delete));
    assert_eq!(fake.requests(), vec!["DELETE /indexes/posts"]);
}

#[tokio::test]
async fn test_upload_failure_leaves_configured_empty_index() {
    let fake = FakeMeili::start(TEST_API_KEY).await;
    fake.set_fail_uploads(true);

    let err = synchronizer(&fake)
        .synchronize(&docs(2), &IndexSettings::default())
        .await
        .unwrap_err();

    // No rollback: the recreated index stays, without documents
    assert_eq!(err.stage(), Some(SyncStage::Upload));
    let index = fake.index("posts").unwrap();
    assert!(index.documents.is_empty());
    assert!(index.settings.is_some());
}
