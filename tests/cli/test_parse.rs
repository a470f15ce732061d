//! Tests for command-line parsing
//!
//! Covers global flags and subcommand names without executing anything.

use clap::Parser;
use postsync::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_parse_sync_defaults() {
    let cli = Cli::try_parse_from(["postsync", "sync"]).unwrap();

    assert_eq!(cli.format, OutputFormat::Human);
    assert!(cli.config.is_none());
    assert!(matches!(cli.command, Commands::Sync(ref args) if !args.quiet));
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "postsync",
        "scan",
        "content/posts",
        "--format",
        "json",
        "--config",
        "site.toml",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    match cli.command {
        Commands::Scan(args) => {
            assert_eq!(args.dir, Some(PathBuf::from("content/posts")));
            assert!(!args.documents);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_show_config_name() {
    let cli = Cli::try_parse_from(["postsync", "show-config", "--toml"]).unwrap();

    assert!(matches!(cli.command, Commands::ShowConfig(ref args) if args.toml));
}

#[test]
fn test_parse_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["postsync", "sync", "--format", "yaml"]).is_err());
}

#[test]
fn test_parse_completions_shell() {
    let cli = Cli::try_parse_from(["postsync", "completions", "zsh"]).unwrap();

    assert!(matches!(cli.command, Commands::Completions(_)));
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
