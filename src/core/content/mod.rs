//! Content extraction module.
//!
//! Turns a tree of markdown/MDX posts into search documents:
//!
//! - File discovery by extension
//! - Front matter splitting (YAML subset or TOML)
//! - Slug derivation from the relative path
//! - Plain-text sanitizing of the body
//! - Document assembly and concurrent orchestration

pub mod assembler;
pub mod frontmatter;
pub mod pipeline;
pub mod sanitizer;
pub mod scanner;
pub mod slug;

pub use assembler::assemble;
pub use frontmatter::parse_front_matter;
pub use pipeline::ContentPipeline;
pub use sanitizer::sanitize;
pub use scanner::ContentScanner;
pub use slug::SlugResolver;
