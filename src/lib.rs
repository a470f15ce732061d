//! postsync - search index builder for static blogs
//!
//! Walks a tree of markdown/MDX posts, turns each one into a plain-text
//! search document and rebuilds a Meilisearch index from scratch on
//! every run. Sites that use a static search index can instead run an
//! external generator (pagefind) through the same entry points.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - content (scan, front matter, slug, sanitize, assemble)
//!   - sync (search backend, HTTP client, rebuild protocol)
//!   - indexer (meilisearch or pagefind)
//!   - services (service container, build hook)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Invocation
//!
//! - Standalone: `postsync sync`
//! - Embedded: [`build_done_hook`] from a post-build hook

// Core domain logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PostsyncError, Result};
pub use core::services::{build_done_hook, Services};
pub use core::types::*;
