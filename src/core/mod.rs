//! Core domain logic
//!
//! Everything here is independent of the CLI, so the same code runs
//! from the `postsync` binary and from a site generator's build hook.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **content**: Discovery, front matter, slugs, sanitizing
//! - **sync**: Search service client and rebuild protocol
//! - **indexer**: Configured indexing method
//! - **services**: Unified service container

pub mod config;
pub mod content;
pub mod error;
pub mod indexer;
pub mod services;
pub mod sync;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PostsyncError, Result};
pub use services::{build_done_hook, Services};
