//! Indexing methods.
//!
//! A site picks one method in configuration. Both implement `Indexer`
//! so callers run whichever was configured without branching on it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::core::config::{api_key_from_env, Config, IndexMethod};
use crate::core::content::ContentPipeline;
use crate::core::error::{PostsyncError, Result};
use crate::core::sync::{IndexSynchronizer, MeiliClient, SearchBackend};
use crate::core::types::{IndexReport, IndexSettings};

/// One way of producing the site's search index
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Method name (e.g., "meilisearch")
    fn name(&self) -> &str;

    /// Build the index end to end
    async fn run(&self) -> Result<IndexReport>;
}

/// Rebuilds a search service index from the content tree
pub struct SearchServiceIndexer<B: SearchBackend = MeiliClient> {
    pipeline: ContentPipeline,
    synchronizer: IndexSynchronizer<B>,
    content_dir: PathBuf,
    settings: IndexSettings,
}

impl<B: SearchBackend> SearchServiceIndexer<B> {
    pub fn new(
        pipeline: ContentPipeline,
        synchronizer: IndexSynchronizer<B>,
        content_dir: PathBuf,
        settings: IndexSettings,
    ) -> Self {
        Self {
            pipeline,
            synchronizer,
            content_dir,
            settings,
        }
    }
}

impl SearchServiceIndexer<MeiliClient> {
    /// Build from configuration
    ///
    /// Checks every required field and the credential before any
    /// network call is made.
    pub fn from_config(config: &Config) -> Result<Self> {
        let host = config.host()?;
        let index_name = config.index_name()?;
        let content_dir = config.content_dir()?.to_path_buf();
        let api_key = api_key_from_env()?;

        let client = MeiliClient::new(
            host,
            &api_key,
            Duration::from_millis(config.search.task_poll_interval_ms),
        )?;

        Ok(Self::new(
            ContentPipeline::from_config(config),
            IndexSynchronizer::new(client, index_name),
            content_dir,
            config.index.clone(),
        ))
    }
}

#[async_trait]
impl<B: SearchBackend> Indexer for SearchServiceIndexer<B> {
    fn name(&self) -> &str {
        "meilisearch"
    }

    async fn run(&self) -> Result<IndexReport> {
        let (documents, extract) = self.pipeline.extract(&self.content_dir).await?;
        let sync = self
            .synchronizer
            .synchronize(&documents, &self.settings)
            .await?;
        Ok(IndexReport::Meilisearch { extract, sync })
    }
}

/// Runs an external static-index generator
pub struct StaticIndexer {
    command: String,
    args: Vec<String>,
}

impl StaticIndexer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.static_index.command.clone(),
            config.static_index.args.clone(),
        )
    }

    /// Command line as it would be typed in a shell
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Indexer for StaticIndexer {
    fn name(&self) -> &str {
        "pagefind"
    }

    async fn run(&self) -> Result<IndexReport> {
        let start = Instant::now();
        let command_line = self.command_line();
        tracing::info!("Running static indexer: {}", command_line);

        let status = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .status()
            .await
            .map_err(|e| {
                PostsyncError::IndexerProcessError(format!("failed to spawn '{command_line}': {e}"))
            })?;

        if !status.success() {
            return Err(PostsyncError::IndexerProcessError(format!(
                "'{command_line}' exited with {status}"
            )));
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Static indexer finished in {}ms", duration_ms);

        Ok(IndexReport::Pagefind {
            command: command_line,
            duration_ms,
        })
    }
}

/// Indexer for the method selected in `config`
pub fn create_indexer(config: &Config) -> Result<Box<dyn Indexer>> {
    match config.search.method {
        IndexMethod::Meilisearch => Ok(Box::new(SearchServiceIndexer::from_config(config)?)),
        IndexMethod::Pagefind => Ok(Box::new(StaticIndexer::from_config(config))),
    }
}
