//! Core data types for postsync.
//!
//! Everything here lives for a single run: documents are rebuilt from
//! the content tree on every invocation and never diffed against a
//! previous run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Front matter metadata: string keys to scalar (or list-of-scalar) values
pub type Metadata = Map<String, Value>;

/// A content file read from disk
#[derive(Debug, Clone)]
pub struct ContentFile {
    /// Absolute (or root-joined) path used for reading
    pub path: PathBuf,

    /// Path relative to the content root, used for slugs
    pub relative_path: PathBuf,

    /// Raw file contents
    pub raw_text: String,
}

/// A file split into front matter and body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedContent {
    pub metadata: Metadata,
    pub body: String,
}

impl ParsedContent {
    /// Metadata value rendered as a string
    ///
    /// Strings are returned as-is; other scalars use their JSON text.
    /// `null` counts as absent.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// The unit persisted to the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Position of the source file in the discovery-ordered list
    pub id: usize,

    /// Externally visible slug, e.g. `/posts/guide/setup/`
    pub slug: String,

    /// Title from front matter; absent stays absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub description: String,

    /// Sanitized plain text body
    pub content: String,

    /// Publication time in epoch milliseconds
    pub pub_date: i64,
}

/// Attribute lists applied to the index before upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexSettings {
    #[serde(default = "default_searchable_attributes")]
    pub searchable_attributes: Vec<String>,

    #[serde(default = "default_displayed_attributes")]
    pub displayed_attributes: Vec<String>,

    #[serde(default = "default_sortable_attributes")]
    pub sortable_attributes: Vec<String>,
}

fn default_searchable_attributes() -> Vec<String> {
    vec![
        "title".to_string(),
        "description".to_string(),
        "content".to_string(),
    ]
}

fn default_displayed_attributes() -> Vec<String> {
    vec![
        "title".to_string(),
        "description".to_string(),
        "slug".to_string(),
        "pubDate".to_string(),
        "content".to_string(),
    ]
}

fn default_sortable_attributes() -> Vec<String> {
    vec!["pubDate".to_string()]
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            searchable_attributes: default_searchable_attributes(),
            displayed_attributes: default_displayed_attributes(),
            sortable_attributes: default_sortable_attributes(),
        }
    }
}

/// Statistics from a content extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Number of content files discovered (and turned into documents)
    pub files_discovered: usize,

    /// Documents without a `title` field
    pub missing_titles: usize,

    /// Extraction duration in milliseconds
    pub duration_ms: u64,
}

/// States of the index rebuild protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Idle,
    Deleting,
    Deleted,
    Configuring,
    Configured,
    Uploading,
    Done,
    DoneEmpty,
    DeleteError,
    ConfigError,
    UploadError,
}

impl SyncState {
    /// Error state for a failure while in this (in-progress) state
    pub fn failure(self) -> Option<SyncState> {
        match self {
            SyncState::Deleting => Some(SyncState::DeleteError),
            SyncState::Configuring => Some(SyncState::ConfigError),
            SyncState::Uploading => Some(SyncState::UploadError),
            _ => None,
        }
    }
}

/// Result of a completed synchronization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub index_name: String,

    /// Whether an index existed before the delete step
    pub previous_index_existed: bool,

    pub documents_uploaded: usize,

    /// Terminal state: `Done` or `DoneEmpty`
    pub state: SyncState,

    pub duration_ms: u64,
}

/// Outcome of one indexer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum IndexReport {
    /// Search service rebuilt from the content tree
    Meilisearch {
        extract: ExtractStats,
        sync: SyncReport,
    },
    /// External static-index generator ran to completion
    Pagefind { command: String, duration_ms: u64 },
}
