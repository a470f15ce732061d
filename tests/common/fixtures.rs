// Content tree fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary blog content directory
#[allow(dead_code)] // Used in integration tests
pub struct ContentTree {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

#[allow(dead_code)] // Used in integration tests
impl ContentTree {
    /// A small blog: nested index posts, a flat post, an MDX post,
    /// an untitled note and a non-content asset
    pub fn blog() -> Self {
        Self::with_files(&[
            (
                "hello-world/index.md",
                "---\ntitle: Hello World\ndescription: The first post\npublished: 2024-01-15\ntags: [intro, meta]\n---\n# Hello\n\nWelcome to the **blog**.\n\n```rust\nfn main() {}\n```\n",
            ),
            (
                "guides/setup.md",
                "---\ntitle: \"Setup: a guide\"\npublished: 2024-02-01T10:30:00Z\n---\nInstall with `npm i` and run <kbd>start</kbd>.\n",
            ),
            (
                "guides/index.mdx",
                "+++\ntitle = \"Guides\"\ndescription = \"All guides\"\npublished = 2023-12-31\n+++\nimport Card from './Card'\n\n<Card>Read these</Card>\n",
            ),
            ("notes/untitled.md", "Just some text without front matter.\n"),
            ("hello-world/cover.png", "not really a png"),
        ])
    }

    /// A tree with no content files at all
    pub fn empty() -> Self {
        Self::with_files(&[("assets/logo.svg", "<svg/>")])
    }

    /// Create a tree with the given (relative path, contents) pairs
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut paths = Vec::new();

        for (rel_path, content) in files {
            let full_path = dir.path().join(rel_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(&full_path, content).expect("Failed to write file");
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add another file after creation
    pub fn add_file(&mut self, rel_path: &str, content: &str) {
        let full_path = self.dir.path().join(rel_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self.files.push(full_path);
    }
}
