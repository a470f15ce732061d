//! postsync CLI - build the search index for a static blog
//!
//! # Examples
//!
//! ```bash
//! # Rebuild the configured index
//! MEILI_MASTER_KEY=... postsync sync
//!
//! # Preview extracted documents without contacting the service
//! postsync scan src/content/posts
//!
//! # Show configuration
//! postsync show-config --format json
//! ```

use clap::Parser;
use postsync::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postsync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
