//! Command-line interface for walkrepo

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// walkrepo - list a directory tree the way .gitignore rules see it
#[derive(Parser)]
#[command(
    name = "walkrepo",
    version,
    about = "Walk a directory tree honoring hierarchical .gitignore files",
    long_about = "walkrepo walks a directory tree once, reading the .gitignore of every directory it enters and applying its rules to that directory and everything below it."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ~/.walkrepo/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every entry the walk visits
    List {
        /// Directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Only print files
        #[arg(long)]
        files_only: bool,

        /// Do not descend below this depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Additional rule file name (repeatable)
        #[arg(long = "rule-file", value_name = "NAME")]
        rule_files: Vec<String>,

        /// Pattern applied from the root before any rule file (repeatable)
        #[arg(long, value_name = "PATTERN")]
        exclude: Vec<String>,

        /// Print walk statistics
        #[arg(long)]
        stats: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show whether paths are excluded and by which rule
    Check {
        /// Paths to check, relative to the root or absolute under it
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Walk root the paths belong to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
