//! Slug derivation from content paths.
//!
//! The slug depends only on the file's path relative to the content
//! root, never on its metadata or body.

use std::path::{Component, Path};

/// Default prefix of every document slug
pub const DEFAULT_URL_PREFIX: &str = "/posts/";

/// Derives canonical slugs from relative content paths
#[derive(Debug, Clone)]
pub struct SlugResolver {
    prefix: String,
}

impl SlugResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Slug body: directory plus file stem, `index` files collapse
    /// onto their directory.
    ///
    /// `b/post.md` -> `b/post`, `b/index.md` -> `b`, `index.md` -> `""`.
    pub fn slug_body(&self, relative: &Path) -> String {
        let dir = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        let name = relative
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let body = if name == "index" {
            dir
        } else if dir.is_empty() {
            name
        } else {
            format!("{dir}/{name}")
        };

        // Backslashes survive `components()` on non-Windows hosts
        body.replace('\\', "/")
    }

    /// Externally visible slug: `prefix + body + "/"`
    ///
    /// A root-level `index.md` produces `/posts//`.
    pub fn resolve(&self, relative: &Path) -> String {
        format!("{}{}/", self.prefix, self.slug_body(relative))
    }
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self::new(DEFAULT_URL_PREFIX)
    }
}
