//! Depth-first directory walk with hierarchical rule files

use crate::config::WalkConfig;
use crate::core::error::{Result, WalkError};
use crate::ignore::matcher::{MatchResult, PatternSet};
use crate::ignore::parser::RuleFileParser;
use crate::walker::entry::Entry;
use serde::Serialize;
use std::fs::{self, DirEntry, FileType};
use std::path::{Path, PathBuf};

/// What the walker should do after visiting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep going, descending into the entry if it is a directory
    Continue,
    /// Do not descend into this directory; no effect on files
    SkipSubtree,
}

/// Callback invoked for every entry the walk does not exclude.
///
/// Returning an error aborts the whole walk; the error is handed back to the
/// caller inside [`WalkError::Visitor`].
pub trait Visitor {
    fn visit(&mut self, entry: &Entry) -> anyhow::Result<Visit>;
}

impl<F> Visitor for F
where
    F: FnMut(&Entry) -> anyhow::Result<Visit>,
{
    fn visit(&mut self, entry: &Entry) -> anyhow::Result<Visit> {
        self(entry)
    }
}

/// Counters collected during a walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Entries handed to the visitor
    pub visited: usize,
    /// Entries dropped by a pattern (excluded directories count once)
    pub excluded: usize,
    /// Directories the visitor asked not to descend into
    pub skipped_subtrees: usize,
    /// Directories listed, the root included
    pub directories: usize,
    /// Rule files read
    pub rule_files: usize,
}

/// Walks a tree once, layering each directory's rule files onto the
/// patterns inherited from its ancestors.
#[derive(Debug, Clone)]
pub struct RepoWalker {
    root: PathBuf,
    config: WalkConfig,
}

impl RepoWalker {
    /// Create a walker with the default configuration
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_config(root, WalkConfig::default())
    }

    pub fn with_config(root: impl AsRef<Path>, config: WalkConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    /// Also read files with this name as rule files
    pub fn rule_file(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.config.rule_files.contains(&name) {
            self.config.rule_files.push(name);
        }
        self
    }

    /// Add a pattern applied from the root before any rule file
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude.push(pattern.into());
        self
    }

    /// Set maximum depth for directory traversal
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk the tree, calling `visitor` for every entry not excluded.
    pub fn walk<V>(&self, visitor: &mut V) -> Result<WalkStats>
    where
        V: Visitor + ?Sized,
    {
        let parser = self.config.parser();
        let base = self.config.base_patterns();

        let mut frame = Frame {
            parser: &parser,
            max_depth: self.config.max_depth,
            stats: WalkStats::default(),
        };
        frame.walk_dir(&self.root, &[], &base, visitor)?;

        tracing::debug!(
            root = %self.root.display(),
            visited = frame.stats.visited,
            excluded = frame.stats.excluded,
            "walk complete"
        );
        Ok(frame.stats)
    }
}

/// Walk `root` with the default configuration.
pub fn walk_repo<V>(root: impl AsRef<Path>, mut visitor: V) -> Result<()>
where
    V: Visitor,
{
    RepoWalker::new(root).walk(&mut visitor).map(|_| ())
}

struct Frame<'a> {
    parser: &'a RuleFileParser,
    max_depth: Option<usize>,
    stats: WalkStats,
}

impl Frame<'_> {
    fn walk_dir<V>(
        &mut self,
        dir: &Path,
        components: &[String],
        inherited: &PatternSet,
        visitor: &mut V,
    ) -> Result<()>
    where
        V: Visitor + ?Sized,
    {
        self.stats.directories += 1;
        let listed = list_dir(dir)?;

        // Rule files first: their patterns apply to every sibling entry.
        let mut own = Vec::new();
        for (entry, file_type) in &listed {
            if self.is_rule_file(entry, file_type) {
                own.extend(self.parser.parse_file(&entry.path(), components)?);
                self.stats.rule_files += 1;
            }
        }
        let patterns = inherited.extended(own);

        for (entry, file_type) in listed {
            if self.is_rule_file(&entry, &file_type) {
                continue;
            }

            let mut child = components.to_vec();
            child.push(entry.file_name().to_string_lossy().into_owned());
            let is_dir = file_type.is_dir();

            if let MatchResult::Excluded(pattern) = patterns.matched(&child, is_dir) {
                if is_dir {
                    tracing::debug!(path = %entry.path().display(), rule = %pattern, "pruned");
                } else {
                    tracing::trace!(path = %entry.path().display(), rule = %pattern, "excluded");
                }
                self.stats.excluded += 1;
                continue;
            }

            let (metadata, error) = match entry.metadata() {
                Ok(metadata) => (Some(metadata), None),
                Err(e) => (None, Some(e)),
            };
            let item = Entry {
                path: entry.path(),
                components: child,
                file_type,
                metadata,
                error,
            };

            self.stats.visited += 1;
            match visitor.visit(&item) {
                Ok(Visit::Continue) => {},
                Ok(Visit::SkipSubtree) => {
                    if is_dir {
                        tracing::trace!(path = %item.path.display(), "subtree skipped");
                        self.stats.skipped_subtrees += 1;
                        continue;
                    }
                },
                Err(e) => return Err(WalkError::visitor(item.path, e)),
            }

            if !is_dir {
                continue;
            }
            if self.max_depth.map_or(false, |max| item.depth() >= max) {
                continue;
            }

            self.walk_dir(&item.path, &item.components, &patterns, visitor)?;
        }

        Ok(())
    }

    fn is_rule_file(&self, entry: &DirEntry, file_type: &FileType) -> bool {
        !file_type.is_dir() && self.parser.is_rule_file(&entry.file_name().to_string_lossy())
    }
}

/// Entries of `dir` in file name order, with their (unfollowed) types
fn list_dir(dir: &Path) -> Result<Vec<(DirEntry, FileType)>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| WalkError::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| WalkError::io(dir, e))?;
    entries.sort_by_key(DirEntry::file_name);

    entries
        .into_iter()
        .map(|entry| {
            let file_type = entry.file_type().map_err(|e| WalkError::io(entry.path(), e))?;
            Ok((entry, file_type))
        })
        .collect()
}
