//! Ignore rules with .gitignore support
//!
//! This module compiles rule file lines into directory-scoped patterns and
//! evaluates paths against ordered pattern sets. It supports all gitignore
//! pattern forms: wildcards, negation, directory-only and anchored patterns,
//! and hierarchical rule files.

pub mod checker;
pub mod matcher;
pub mod parser;
pub mod pattern;

// Re-export commonly used items
pub use checker::{IgnoreChecker, IgnoreResult, Rule};
pub use matcher::{MatchResult, PatternSet};
pub use parser::{parse_content, RuleFileParser, GITIGNORE};
pub use pattern::{Origin, Pattern, Segment};
