//! CLI adapter for postsync
//!
//! Thin clap layer over `core/`. The build hook entry point in
//! `core::services` runs the same code without going through here.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// postsync - search index builder for static blogs
///
/// Extracts plain-text documents from a markdown/MDX content tree and
/// rebuilds a Meilisearch index from them, or runs a static index
/// generator such as pagefind.
#[derive(Parser, Debug)]
#[command(name = "postsync")]
#[command(version)]
#[command(about = "Search index builder for static blogs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (overrides POSTSYNC_CONFIG and the XDG lookup)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configured indexing method
    ///
    /// For meilisearch this deletes the index, recreates it, applies the
    /// attribute settings and uploads every document. The API key is read
    /// from MEILI_MASTER_KEY.
    Sync(commands::SyncArgs),

    /// Extract documents from the content tree without touching the service
    Scan(commands::ScanArgs),

    /// Show the resolved configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  postsync completions bash > ~/.local/share/bash-completion/completions/postsync
    ///   zsh:   postsync completions zsh > ~/.zfunc/_postsync
    ///   fish:  postsync completions fish > ~/.config/fish/completions/postsync.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Completions don't need configuration
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load(cli.config.as_deref())?;
    config.log_config();

    let services = Arc::new(Services::new(config));

    match cli.command {
        Commands::Sync(args) => commands::sync::execute(args, &services, cli.format).await,
        Commands::Scan(args) => commands::scan::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
