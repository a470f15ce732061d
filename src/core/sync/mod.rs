//! Search index synchronization.
//!
//! - **backend**: operations consumed from the search service
//! - **meili**: HTTP client for a Meilisearch-compatible service
//! - **synchronizer**: delete/configure/upload protocol

pub mod backend;
pub mod meili;
pub mod synchronizer;

pub use backend::{SearchBackend, PRIMARY_KEY};
pub use meili::MeiliClient;
pub use synchronizer::IndexSynchronizer;
