//! Search service seam.
//!
//! The synchronizer only speaks to this trait, so the rebuild protocol
//! can be driven against the real HTTP client or an in-process fake.

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::{Document, IndexSettings};

/// Document field the search service deduplicates on
pub const PRIMARY_KEY: &str = "id";

/// Operations consumed from the search service
///
/// Each call must have observably completed on the service side
/// before it returns.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Delete `index` if present. Returns whether it existed.
    async fn delete_index_if_exists(&self, index: &str) -> Result<bool>;

    /// Obtain the index, creating it with `primary_key` when absent
    async fn get_or_create_index(&self, index: &str, primary_key: &str) -> Result<()>;

    /// Replace searchable, displayed and sortable attribute lists
    async fn update_settings(&self, index: &str, settings: &IndexSettings) -> Result<()>;

    /// Upload all documents in one batch
    async fn add_documents(
        &self,
        index: &str,
        documents: &[Document],
        primary_key: &str,
    ) -> Result<()>;
}
