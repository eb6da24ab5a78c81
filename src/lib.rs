//! walkrepo - directory walks that honor hierarchical .gitignore rules
//!
//! Every directory may carry a `.gitignore` whose patterns apply to that
//! directory and everything below it. Rules accumulate as the walk descends,
//! and a later, more specific rule overrides an earlier one, including a
//! negation (`!pattern`) re-including a path an ancestor's rule excluded.
//!
//! # Core Features
//!
//! - **Single pass**: the tree is walked once; rule files are read as their
//!   directories are entered
//! - **Scoped rules**: a rule file never affects its parent or its siblings
//! - **Pruning**: excluded directories are not entered at all
//! - **Visitor control**: a visitor can skip a subtree or abort the walk
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use walkrepo::{walk_repo, Entry, Visit};
//!
//! walk_repo("./my-project", |entry: &Entry| -> anyhow::Result<Visit> {
//!     println!("{}", entry.relative_path());
//!     Ok(Visit::Continue)
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod walker;

// Re-export commonly used types
pub use crate::core::error::{Result, WalkError};

pub use config::WalkConfig;

pub use ignore::{IgnoreChecker, IgnoreResult, MatchResult, Pattern, PatternSet};

pub use walker::{walk_repo, Entry, RepoWalker, Visit, Visitor, WalkStats};

/// Current version of walkrepo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
