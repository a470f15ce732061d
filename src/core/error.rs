//! Error types and error handling for postsync.
//!
//! Every failure surfaces to the caller as a `PostsyncError`. Nothing
//! is recovered locally: the outermost boundary (the CLI binary or the
//! build hook's host) decides what to do with it.

use std::fmt;

use thiserror::Error;

/// Result type alias for postsync operations
pub type Result<T> = std::result::Result<T, PostsyncError>;

/// Step of the index rebuild protocol a service error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Delete,
    Create,
    Configure,
    Upload,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::Delete => "delete",
            SyncStage::Create => "create",
            SyncStage::Configure => "configure",
            SyncStage::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// Main error type for postsync
#[derive(Error, Debug)]
pub enum PostsyncError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Discovery failed: {0}")]
    DiscoveryError(String),

    #[error("Invalid front matter: {0}")]
    FrontMatterError(String),

    #[error("Search service error during {stage}: {message}")]
    ServiceError { stage: SyncStage, message: String },

    #[error("Static indexer failed: {0}")]
    IndexerProcessError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PostsyncError {
    /// Shorthand for a service error at the given stage
    pub fn service(stage: SyncStage, message: impl Into<String>) -> Self {
        PostsyncError::ServiceError {
            stage,
            message: message.into(),
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Missing or invalid configuration (raised before any remote call)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PostsyncError::ConfigError(_) | PostsyncError::TomlError(_)
        )
    }

    /// Content tree could not be read
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            PostsyncError::DiscoveryError(_) | PostsyncError::FrontMatterError(_)
        )
    }

    /// The search service rejected or failed a request
    pub fn is_service(&self) -> bool {
        matches!(self, PostsyncError::ServiceError { .. })
    }

    /// Protocol stage of a service error, if any
    pub fn stage(&self) -> Option<SyncStage> {
        match self {
            PostsyncError::ServiceError { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
