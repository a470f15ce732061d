// Integration tests for content extraction

use crate::common::{assert_sequential_ids, ContentTree};
use chrono::Utc;
use postsync::core::config::Config;
use postsync::core::content::ContentPipeline;

fn pipeline() -> ContentPipeline {
    ContentPipeline::from_config(&Config::default())
}

#[tokio::test]
async fn test_blog_extraction() {
    let tree = ContentTree::blog();

    let (docs, stats) = pipeline().extract(tree.path()).await.unwrap();

    // cover.png is not content
    assert_eq!(stats.files_discovered, 4);
    assert_eq!(stats.missing_titles, 1);
    assert_sequential_ids(&docs);

    let slugs: Vec<_> = docs.iter().map(|d| d.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            "/posts/guides/",
            "/posts/guides/setup/",
            "/posts/hello-world/",
            "/posts/notes/untitled/",
        ]
    );
}

#[tokio::test]
async fn test_blog_document_fields() {
    let tree = ContentTree::blog();

    let (docs, _) = pipeline().extract(tree.path()).await.unwrap();

    let guides = &docs[0];
    assert_eq!(guides.title.as_deref(), Some("Guides"));
    assert_eq!(guides.description, "All guides");
    assert_eq!(guides.pub_date, 1_703_980_800_000);
    assert!(guides.content.contains("Read these"));
    assert!(!guides.content.contains("<Card>"));

    let setup = &docs[1];
    assert_eq!(setup.title.as_deref(), Some("Setup: a guide"));
    assert_eq!(setup.description, "");
    assert_eq!(setup.pub_date, 1_706_783_400_000);
    assert_eq!(setup.content, "Install with and run start.");

    let hello = &docs[2];
    assert_eq!(hello.title.as_deref(), Some("Hello World"));
    assert_eq!(hello.pub_date, 1_705_276_800_000);
    assert_eq!(hello.content, "Hello Welcome to the blog.");
}

#[tokio::test]
async fn test_missing_published_uses_run_time() {
    let tree = ContentTree::blog();

    let before = Utc::now().timestamp_millis();
    let (docs, _) = pipeline().extract(tree.path()).await.unwrap();
    let after = Utc::now().timestamp_millis();

    let untitled = &docs[3];
    assert_eq!(untitled.title, None);
    assert_eq!(untitled.content, "Just some text without front matter.");
    assert!(untitled.pub_date >= before && untitled.pub_date <= after);
}

#[tokio::test]
async fn test_empty_tree_yields_no_documents() {
    let tree = ContentTree::empty();

    let (docs, stats) = pipeline().extract(tree.path()).await.unwrap();

    assert!(docs.is_empty());
    assert_eq!(stats.files_discovered, 0);
}

#[tokio::test]
async fn test_custom_prefix_and_extensions() {
    let mut tree = ContentTree::with_files(&[("a.md", "---\ntitle: A\n---\n")]);
    tree.add_file("b.markdown", "---\ntitle: B\n---\n");

    let mut config = Config::default();
    config.content.extensions = vec!["markdown".to_string()];
    config.content.url_prefix = "/blog/".to_string();

    let (docs, _) = ContentPipeline::from_config(&config)
        .extract(tree.path())
        .await
        .unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].slug, "/blog/b/");
}

#[tokio::test]
async fn test_many_files_keep_discovery_order() {
    let files: Vec<(String, String)> = (0..40)
        .map(|i| {
            (
                format!("post-{i:02}/index.md"),
                format!("---\ntitle: Post {i}\n---\nBody {i}"),
            )
        })
        .collect();
    let refs: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let tree = ContentTree::with_files(&refs);

    let (docs, _) = pipeline().extract(tree.path()).await.unwrap();

    assert_eq!(docs.len(), 40);
    assert_sequential_ids(&docs);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc.slug, format!("/posts/post-{i:02}/"));
        assert_eq!(doc.content, format!("Body {i}"));
    }
}

#[tokio::test]
async fn test_malformed_toml_front_matter_fails_run() {
    let tree = ContentTree::with_files(&[
        ("good.md", "---\ntitle: Good\n---\n"),
        ("bad.md", "+++\ntitle = \n+++\n"),
    ]);

    let err = pipeline().extract(tree.path()).await.unwrap_err();

    assert!(err.is_discovery());
    assert!(err.message().contains("bad.md"));
}
