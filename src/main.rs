//! walkrepo CLI
//!
//! Command-line interface for walking directory trees with .gitignore rules.

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use walkrepo::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = commands::load_config(cli.config.as_deref())?;

    // Execute the command
    match cli.command {
        Commands::List {
            root,
            files_only,
            max_depth,
            rule_files,
            exclude,
            stats,
            json,
        } => commands::list::execute(
            root, config, max_depth, rule_files, exclude, files_only, stats, json,
        ),
        Commands::Check { paths, root, json } => {
            commands::check::execute(root, config, paths, cli.verbose, json)
        },
    }
}
