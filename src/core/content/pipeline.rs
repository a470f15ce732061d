//! Content extraction pipeline.
//!
//! Coordinates the per-run workflow:
//! 1. Scan the content root
//! 2. Read every file concurrently
//! 3. Parse front matter, resolve slug, sanitize body
//! 4. Assemble documents in discovery order

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::core::config::Config;
use crate::core::content::{assemble, parse_front_matter, sanitize, ContentScanner, SlugResolver};
use crate::core::error::{PostsyncError, Result};
use crate::core::types::{ContentFile, Document, ExtractStats};

/// Orchestrates content extraction
pub struct ContentPipeline {
    scanner: ContentScanner,
    resolver: Arc<SlugResolver>,
}

impl ContentPipeline {
    pub fn new(scanner: ContentScanner, resolver: SlugResolver) -> Self {
        Self {
            scanner,
            resolver: Arc::new(resolver),
        }
    }

    /// Pipeline configured from the `[content]` section
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContentScanner::new(config.content.extensions.clone(), config.content.sort),
            SlugResolver::new(config.content.url_prefix.clone()),
        )
    }

    /// Extract every content file under `root` into documents
    ///
    /// All files are processed as concurrent tasks. Results are awaited
    /// in discovery order, so `documents[i].id == i` regardless of which
    /// file finishes first. The first failure aborts the run.
    pub async fn extract(&self, root: &Path) -> Result<(Vec<Document>, ExtractStats)> {
        let start = Instant::now();
        let run_started_at = Utc::now();

        tracing::info!("Starting content scan from {:?}", root);
        let files = self.scanner.collect_files(root)?;
        tracing::info!("Found {} content files", files.len());

        let handles: Vec<_> = files
            .into_iter()
            .enumerate()
            .map(|(id, path)| {
                let relative = path
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone());
                let resolver = Arc::clone(&self.resolver);
                tokio::spawn(async move {
                    let file = read_content_file(path, relative).await?;
                    build_document(id, &file, &resolver, run_started_at)
                })
            })
            .collect();

        let mut documents = Vec::with_capacity(handles.len());
        for handle in handles {
            let document = handle.await.map_err(|e| {
                PostsyncError::DiscoveryError(format!("Extraction task failed: {e}"))
            })??;
            documents.push(document);
        }

        let missing_titles = documents.iter().filter(|d| d.title.is_none()).count();
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Extraction complete: {} documents ({} without title) in {}ms",
            documents.len(),
            missing_titles,
            duration_ms
        );

        let stats = ExtractStats {
            files_discovered: documents.len(),
            missing_titles,
            duration_ms,
        };

        Ok((documents, stats))
    }
}

/// Read one content file
pub async fn read_content_file(path: PathBuf, relative_path: PathBuf) -> Result<ContentFile> {
    let raw_text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PostsyncError::DiscoveryError(format!("Failed to read {path:?}: {e}")))?;

    Ok(ContentFile {
        path,
        relative_path,
        raw_text,
    })
}

/// Turn one read file into its document
pub fn build_document(
    id: usize,
    file: &ContentFile,
    resolver: &SlugResolver,
    run_started_at: DateTime<Utc>,
) -> Result<Document> {
    let parsed = parse_front_matter(&file.raw_text).map_err(|e| match e {
        PostsyncError::FrontMatterError(msg) => {
            PostsyncError::FrontMatterError(format!("{:?}: {msg}", file.path))
        }
        other => other,
    })?;
    let slug = resolver.resolve(&file.relative_path);
    let content = sanitize(&parsed.body);

    if !parsed.metadata.contains_key("title") {
        tracing::warn!("{:?} has no title", file.relative_path);
    }
    tracing::debug!("Extracted {:?} as {}", file.relative_path, slug);

    Ok(assemble(id, &parsed, slug, content, run_started_at))
}
