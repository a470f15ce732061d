//! Tests for the show-config command

use crate::cli::test_helpers::{create_cli_test_services, default_cli_services};
use postsync::cli::commands::config::{execute, ConfigArgs, ConfigResponse};
use postsync::cli::OutputFormat;
use postsync::core::config::Config;

#[tokio::test]
async fn test_show_config_human() {
    let services = default_cli_services();

    let result = execute(ConfigArgs { toml: false }, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_json_and_toml() {
    let mut config = Config::default();
    config.search.host = Some("http://localhost:7700".to_string());
    let services = create_cli_test_services(config);

    assert!(execute(ConfigArgs { toml: false }, &services, OutputFormat::Json)
        .await
        .is_ok());
    assert!(execute(ConfigArgs { toml: true }, &services, OutputFormat::Human)
        .await
        .is_ok());
}

#[test]
fn test_config_response_flattens_sections() {
    let mut config = Config::default();
    config.search.index_name = Some("posts".to_string());

    let response = ConfigResponse {
        config_file: "/tmp/config.toml".to_string(),
        api_key_set: false,
        config: &config,
    };
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["search"]["index_name"], "posts");
    assert_eq!(value["search"]["method"], "meilisearch");
    assert_eq!(value["content"]["url_prefix"], "/posts/");
    assert_eq!(value["api_key_set"], false);
}
