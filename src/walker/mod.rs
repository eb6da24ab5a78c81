//! Tree walker honoring hierarchical rule files
//!
//! The walker descends depth-first, reads the rule files of each directory it
//! enters, and layers their patterns onto those inherited from the ancestors.
//! Excluded entries are never visited and excluded directories are never
//! entered, so rule files below them are never read.

pub mod entry;
pub mod walk;

// Re-export commonly used items
pub use entry::Entry;
pub use walk::{walk_repo, RepoWalker, Visit, Visitor, WalkStats};
