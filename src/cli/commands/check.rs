//! Check command implementation

use crate::config::WalkConfig;
use crate::ignore::checker::{IgnoreChecker, IgnoreResult};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the check command
pub fn execute(
    root: PathBuf,
    config: WalkConfig,
    paths: Vec<PathBuf>,
    verbose: bool,
    json: bool,
) -> Result<()> {
    let mut checker = IgnoreChecker::with_config(&root, &config);
    let mut results = Vec::new();

    for path in &paths {
        let result = checker.check(path)?;

        if json {
            let reachable = !matches!(result, IgnoreResult::Unreachable(_));
            results.push(json!({
                "path": path.display().to_string(),
                "excluded": result.is_excluded(),
                "reachable": reachable,
                "rule": result.rule().map(|rule| rule.to_string()),
            }));
            continue;
        }

        let status = match &result {
            IgnoreResult::Excluded(_) => "excluded".red(),
            IgnoreResult::IncludedByNegation(_) | IgnoreResult::Included => "included".green(),
            IgnoreResult::Unreachable(_) => "unreachable".yellow(),
        };
        match &result {
            IgnoreResult::Unreachable(through) if verbose => {
                println!("{}\t{}\t{}", status, path.display(), through.display())
            },
            _ => match result.rule() {
                Some(rule) if verbose => println!("{}\t{}\t{}", status, path.display(), rule),
                _ => println!("{}\t{}", status, path.display()),
            },
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(())
}
