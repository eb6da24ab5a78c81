//! List command implementation

use crate::config::WalkConfig;
use crate::walker::{Entry, RepoWalker, Visit};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the list command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    root: PathBuf,
    mut config: WalkConfig,
    max_depth: Option<usize>,
    rule_files: Vec<String>,
    exclude: Vec<String>,
    files_only: bool,
    stats: bool,
    json: bool,
) -> Result<()> {
    if max_depth.is_some() {
        config.max_depth = max_depth;
    }
    config.exclude.extend(exclude);

    let mut walker = RepoWalker::with_config(&root, config);
    for name in rule_files {
        walker = walker.rule_file(name);
    }

    let mut entries = Vec::new();
    let walk_stats = walker.walk(&mut |entry: &Entry| -> Result<Visit> {
        if files_only && entry.is_dir() {
            return Ok(Visit::Continue);
        }

        if json {
            entries.push(json!({
                "path": entry.relative_path(),
                "dir": entry.is_dir(),
            }));
        } else if entry.is_dir() {
            println!("{}", format!("{}/", entry.relative_path()).blue());
        } else {
            println!("{}", entry.relative_path());
        }
        Ok(Visit::Continue)
    })?;

    if json {
        let mut output = json!({ "entries": entries });
        if stats {
            output["stats"] = serde_json::to_value(&walk_stats)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if stats {
        println!();
        println!("{}", "Walk statistics:".bold());
        println!("  • Visited: {}", walk_stats.visited);
        println!("  • Excluded: {}", walk_stats.excluded);
        println!("  • Skipped subtrees: {}", walk_stats.skipped_subtrees);
        println!("  • Directories: {}", walk_stats.directories);
        println!("  • Rule files: {}", walk_stats.rule_files);
    }

    Ok(())
}
