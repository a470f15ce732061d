//! Content file discovery.
//!
//! Traverses the content root and keeps files whose extension is in
//! the allow-list. Nothing else is filtered: hidden files, drafts and
//! dot-directories are all included.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{PostsyncError, Result};

/// Recursive content file scanner
pub struct ContentScanner {
    /// Extensions to keep, without the leading dot
    extensions: Vec<String>,

    /// Sort entries by file name at each directory level
    sort: bool,
}

impl ContentScanner {
    /// Create a new scanner
    ///
    /// # Arguments
    ///
    /// * `extensions` - Allowed extensions (e.g. `md`, `mdx`), matched exactly
    /// * `sort` - Sort entries by name so discovery order is stable
    pub fn new(extensions: Vec<String>, sort: bool) -> Self {
        Self { extensions, sort }
    }

    /// Collect all content files under `root`
    ///
    /// Fails if the root itself is missing, not a directory or
    /// unreadable. Errors below the root are logged and skipped.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(root).map_err(|e| {
            PostsyncError::DiscoveryError(format!("Cannot read content root {root:?}: {e}"))
        })?;
        if !metadata.is_dir() {
            return Err(PostsyncError::DiscoveryError(format!(
                "Content root {root:?} is not a directory"
            )));
        }

        let mut walker = WalkDir::new(root).follow_links(false);
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    if self.has_allowed_extension(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(e) if e.depth() == 0 => {
                    return Err(PostsyncError::DiscoveryError(format!(
                        "Cannot read content root {root:?}: {e}"
                    )));
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        tracing::debug!("Discovered {} content files under {:?}", files.len(), root);
        Ok(files)
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }
}
