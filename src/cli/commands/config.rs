//! Config command - show the resolved configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::{Config, API_KEY_ENV};
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the configuration as TOML instead of a summary
    #[arg(long, short = 't')]
    pub toml: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    /// Whether the credential variable is set; the value is never shown
    pub api_key_set: bool,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();

    if args.toml {
        print!("{}", toml::to_string_pretty(config)?);
        return Ok(());
    }

    let response = ConfigResponse {
        config_file: XdgDirs::new().config_file().to_string_lossy().into_owned(),
        api_key_set: std::env::var(API_KEY_ENV).is_ok_and(|k| !k.trim().is_empty()),
        config,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &ConfigResponse<'_>) {
    let config = response.config;
    let unset = || colors::dim("<unset>").to_string();

    println!("{}", colors::label("Configuration:"));
    println!("  config_file: {}", response.config_file);
    println!("  search:");
    println!("    method: {}", config.search.method);
    println!(
        "    host: {}",
        config.search.host.clone().unwrap_or_else(unset)
    );
    println!(
        "    index_name: {}",
        config.search.index_name.clone().unwrap_or_else(unset)
    );
    println!(
        "    task_poll_interval_ms: {}",
        config.search.task_poll_interval_ms
    );
    println!(
        "    {}: {}",
        API_KEY_ENV,
        if response.api_key_set { "set" } else { "not set" }
    );
    println!("  content:");
    println!(
        "    dir: {}",
        config
            .content
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(unset)
    );
    println!("    extensions: {:?}", config.content.extensions);
    println!("    url_prefix: {}", config.content.url_prefix);
    println!("    sort: {}", config.content.sort);
    println!("  index:");
    println!(
        "    searchable_attributes: {:?}",
        config.index.searchable_attributes
    );
    println!(
        "    displayed_attributes: {:?}",
        config.index.displayed_attributes
    );
    println!(
        "    sortable_attributes: {:?}",
        config.index.sortable_attributes
    );
    println!("  static_index:");
    println!("    command: {}", config.static_index.command);
    println!("    args: {:?}", config.static_index.args);
}
