// Test helper functions

use postsync::core::config::{Config, API_KEY_ENV};
use postsync::core::services::Services;
use postsync::core::types::Document;
use std::path::Path;

/// API key the fake search service accepts
#[allow(dead_code)] // Used in integration tests
pub const TEST_API_KEY: &str = "test-master-key";

/// Config pointing at a search service and content directory
#[allow(dead_code)] // Used in integration tests
pub fn meili_config(host: &str, index_name: &str, content_dir: &Path) -> Config {
    let mut config = Config::default();
    config.search.host = Some(host.to_string());
    config.search.index_name = Some(index_name.to_string());
    config.search.task_poll_interval_ms = 5;
    config.content.dir = Some(content_dir.to_path_buf());
    config
}

/// Services for a given config
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(config: Config) -> Services {
    Services::new(config)
}

/// Set the credential for the duration of a `#[serial]` test
#[allow(dead_code)] // Used in integration tests
pub fn set_api_key() {
    std::env::set_var(API_KEY_ENV, TEST_API_KEY);
}

#[allow(dead_code)] // Used in integration tests
pub fn clear_api_key() {
    std::env::remove_var(API_KEY_ENV);
}

/// Assert ids are exactly 0..N-1 in order
#[allow(dead_code)] // Used in integration tests
pub fn assert_sequential_ids(documents: &[Document]) {
    for (expected, doc) in documents.iter().enumerate() {
        assert_eq!(
            doc.id, expected,
            "Expected id {} for {}, got {}",
            expected, doc.slug, doc.id
        );
    }
}
