//! Unified service container for postsync
//!
//! Provides shared access to configuration and builds the per-run
//! components from it.

use crate::core::config::Config;
use crate::core::content::ContentPipeline;
use crate::core::error::Result;
use crate::core::indexer::{create_indexer, Indexer};
use crate::core::types::IndexReport;
use std::sync::Arc;

/// Unified services container
///
/// The CLI and the embedded build hook both go through this struct.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Content pipeline configured from `[content]`
    pub fn create_pipeline(&self) -> ContentPipeline {
        ContentPipeline::from_config(&self.config)
    }

    /// Indexer for the configured method
    ///
    /// Fails with a configuration error if a required field or the
    /// credential is missing.
    pub fn create_indexer(&self) -> Result<Box<dyn Indexer>> {
        create_indexer(&self.config)
    }

    /// Run the configured indexer once
    pub async fn run(&self) -> Result<IndexReport> {
        let indexer = self.create_indexer()?;
        tracing::info!("Indexing with method '{}'", indexer.name());
        indexer.run().await
    }
}

/// Entry point for a site generator's post-build hook
///
/// Runs the configured indexing method once and returns its report.
/// Errors are returned to the host unchanged.
pub async fn build_done_hook(config: Config) -> Result<IndexReport> {
    config.validate()?;
    Services::new(config).run().await
}
