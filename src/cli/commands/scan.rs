//! Scan command - extract documents without contacting the search service

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::Document;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Content directory (defaults to content.dir from configuration)
    pub dir: Option<PathBuf>,

    /// Include full document bodies in the output
    #[arg(long, short = 'd')]
    pub documents: bool,
}

/// Scan result response
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub root: String,
    pub files_discovered: usize,
    pub missing_titles: usize,
    pub duration_ms: u64,
    pub entries: Vec<ScanEntry>,
}

/// One extracted document
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanEntry {
    Summary {
        id: usize,
        slug: String,
        title: Option<String>,
    },
    Full(Document),
}

/// Execute the scan command
pub async fn execute(
    args: ScanArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = match args.dir {
        Some(dir) => dir,
        None => services.config.content_dir()?.to_path_buf(),
    };

    let (documents, stats) = services.create_pipeline().extract(&root).await?;

    let entries = documents
        .into_iter()
        .map(|doc| {
            if args.documents {
                ScanEntry::Full(doc)
            } else {
                ScanEntry::Summary {
                    id: doc.id,
                    slug: doc.slug,
                    title: doc.title,
                }
            }
        })
        .collect();

    let response = ScanResponse {
        root: root.to_string_lossy().into_owned(),
        files_discovered: stats.files_discovered,
        missing_titles: stats.missing_titles,
        duration_ms: stats.duration_ms,
        entries,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &ScanResponse) {
    for entry in &response.entries {
        match entry {
            ScanEntry::Summary { id, slug, title } => {
                println!(
                    "{:>4}  {}  {}",
                    colors::dim(&id.to_string()),
                    colors::file_path(slug),
                    title.as_deref().unwrap_or("<untitled>")
                );
            }
            ScanEntry::Full(doc) => {
                println!(
                    "{:>4}  {}  {}",
                    colors::dim(&doc.id.to_string()),
                    colors::file_path(&doc.slug),
                    doc.title.as_deref().unwrap_or("<untitled>")
                );
                if !doc.description.is_empty() {
                    println!("      {}", colors::label(&doc.description));
                }
                println!("      {}", doc.content);
            }
        }
    }

    println!(
        "{} {} documents from {} in {}",
        colors::success("Scanned"),
        colors::number(&response.files_discovered.to_string()),
        colors::file_path(&response.root),
        colors::number(&format_duration(response.duration_ms as f64 / 1000.0))
    );
    if response.missing_titles > 0 {
        println!(
            "{} {} without title",
            colors::warning("Note:"),
            colors::number(&response.missing_titles.to_string())
        );
    }
}
