//! Sync command - run the configured indexing method

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{IndexReport, SyncState};
use clap::Args;
use std::sync::Arc;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Execute the sync command
pub async fn execute(
    args: SyncArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let indexer = services.create_indexer()?;

    if !args.quiet && format == OutputFormat::Human {
        eprintln!("Indexing with {}...", colors::label(indexer.name()));
    }

    let report = indexer.run().await?;

    match format {
        OutputFormat::Human => print_report(&report),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_report(report: &IndexReport) {
    match report {
        IndexReport::Meilisearch { extract, sync } => {
            if extract.missing_titles > 0 {
                println!(
                    "{} {} documents have no title",
                    colors::warning("Note:"),
                    colors::number(&extract.missing_titles.to_string())
                );
            }
            if sync.state == SyncState::DoneEmpty {
                println!(
                    "{} no documents found; index '{}' was deleted and not recreated",
                    colors::warning("Empty:"),
                    sync.index_name
                );
                return;
            }
            println!(
                "{} {} documents to '{}' in {}",
                colors::success("Synced"),
                colors::number(&sync.documents_uploaded.to_string()),
                sync.index_name,
                colors::number(&format_duration(
                    (extract.duration_ms + sync.duration_ms) as f64 / 1000.0
                ))
            );
            let previous = if sync.previous_index_existed {
                "replaced existing index"
            } else {
                "created new index"
            };
            println!("{}", colors::dim(previous));
        }
        IndexReport::Pagefind {
            command,
            duration_ms,
        } => {
            println!(
                "{} {} in {}",
                colors::success("Ran"),
                colors::label(command),
                colors::number(&format_duration(*duration_ms as f64 / 1000.0))
            );
        }
    }
}
