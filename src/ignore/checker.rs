//! Single-path ignore checking with hierarchical rule file support

use crate::config::WalkConfig;
use crate::core::error::{Result, WalkError};
use crate::core::types::{split_components, Components};
use crate::ignore::matcher::{MatchResult, PatternSet};
use crate::ignore::parser::RuleFileParser;
use crate::ignore::pattern::{Origin, Pattern};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The rule that decided an [`IgnoreResult`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Line as written in the rule file
    pub source: String,
    /// Rule file and line, absent for configured global patterns
    pub origin: Option<Origin>,
}

impl From<&Pattern> for Rule {
    fn from(pattern: &Pattern) -> Self {
        Self {
            source: pattern.source().to_string(),
            origin: pattern.origin().cloned(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{}:{}", origin, self.source),
            None => write!(f, "<exclude>:{}", self.source),
        }
    }
}

/// Result of ignore checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreResult {
    /// No rule applies
    Included,
    /// The path, or one of its ancestors, is excluded by this rule
    Excluded(Rule),
    /// The last matching rule is a negation
    IncludedByNegation(Rule),
    /// The walk never gets there: this ancestor is a symbolic link or a file
    Unreachable(PathBuf),
}

impl IgnoreResult {
    pub fn is_excluded(&self) -> bool {
        matches!(self, IgnoreResult::Excluded(_))
    }

    /// Whether a walk from the root would visit the path
    pub fn is_visited(&self) -> bool {
        matches!(self, IgnoreResult::Included | IgnoreResult::IncludedByNegation(_))
    }

    pub fn rule(&self) -> Option<&Rule> {
        match self {
            IgnoreResult::Included | IgnoreResult::Unreachable(_) => None,
            IgnoreResult::Excluded(rule) | IgnoreResult::IncludedByNegation(rule) => Some(rule),
        }
    }
}

/// Answers whether individual paths under a root would be walked.
///
/// Reads only the rule files of the queried path's ancestors and caches the
/// pattern set of every directory it loads. Decisions agree with
/// [`RepoWalker`](crate::walker::RepoWalker): a path below an excluded
/// directory is excluded whatever deeper rule files say.
#[derive(Debug)]
pub struct IgnoreChecker {
    /// Walk root
    root: PathBuf,
    parser: RuleFileParser,
    /// Configured global patterns
    base: PatternSet,
    /// Pattern sets of loaded directories, keyed by components below the root
    sets: HashMap<Components, PatternSet>,
}

impl IgnoreChecker {
    /// Create a new ignore checker with the default configuration
    pub fn new(root: &Path) -> Self {
        Self::with_config(root, &WalkConfig::default())
    }

    /// Create a checker with the given configuration.
    ///
    /// A relative `root` is resolved against the current directory so that
    /// absolute paths can be checked against it.
    pub fn with_config(root: &Path, config: &WalkConfig) -> Self {
        let root = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(root))
                .unwrap_or_else(|_| root.to_path_buf())
        };

        Self {
            root,
            parser: config.parser(),
            base: config.base_patterns(),
            sets: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check a path given relative to the root, or absolute under it.
    ///
    /// Whether it is a directory is read from the filesystem; paths that do
    /// not exist are checked as files.
    pub fn check(&mut self, path: &Path) -> Result<IgnoreResult> {
        let relative = self.relative_to_root(path)?;
        let components = split_components(&relative).ok_or_else(|| {
            WalkError::configuration(format!("{} escapes {}", path.display(), self.root.display()))
        })?;
        let Some((last, ancestors)) = components.split_last() else {
            return Ok(IgnoreResult::Included);
        };

        // The walk only descends into real directories.
        let mut location = self.root.clone();
        for (depth, name) in ancestors.iter().enumerate() {
            location.push(name);
            match fs::symlink_metadata(&location) {
                Ok(metadata) if !metadata.is_dir() => {
                    return match self.check_components(&components[..=depth], false)? {
                        IgnoreResult::Excluded(rule) => Ok(IgnoreResult::Excluded(rule)),
                        _ => Ok(IgnoreResult::Unreachable(location)),
                    };
                },
                _ => {},
            }
        }

        location.push(last);
        let is_dir = fs::symlink_metadata(&location)
            .map(|m| m.is_dir())
            .unwrap_or(false);

        self.check_components(&components, is_dir)
    }

    /// Check a path given as components below the root.
    pub fn check_components(&mut self, path: &[String], is_dir: bool) -> Result<IgnoreResult> {
        if path.is_empty() {
            return Ok(IgnoreResult::Included);
        }

        let last = path.len() - 1;
        for depth in 0..path.len() {
            let set = self.set_for(&path[..depth])?;
            let entry = &path[..=depth];
            let entry_is_dir = depth < last || is_dir;

            match set.matched(entry, entry_is_dir) {
                MatchResult::Excluded(pattern) => return Ok(IgnoreResult::Excluded(pattern.into())),
                MatchResult::Included(pattern) if depth == last => {
                    return Ok(IgnoreResult::IncludedByNegation(pattern.into()));
                },
                _ => {},
            }
        }

        Ok(IgnoreResult::Included)
    }

    /// Drop every cached pattern set so rule files are read again
    pub fn reload(&mut self) {
        self.sets.clear();
    }

    /// Number of directories loaded and the size of the largest pattern set
    pub fn stats(&self) -> (usize, usize) {
        let largest_set = self.sets.values().map(PatternSet::len).max().unwrap_or(0);
        (self.sets.len(), largest_set)
    }

    /// `path` relative to the root; absolute paths must lie under it
    fn relative_to_root(&self, path: &Path) -> Result<PathBuf> {
        if !path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        if let Ok(relative) = path.strip_prefix(&self.root) {
            return Ok(relative.to_path_buf());
        }

        // Compare resolved forms, keeping the last component unresolved so a
        // symbolic link is checked as itself.
        let resolved = path
            .parent()
            .zip(path.file_name())
            .and_then(|(parent, name)| fs::canonicalize(parent).ok().map(|p| p.join(name)));
        if let (Some(resolved), Ok(root)) = (resolved, fs::canonicalize(&self.root)) {
            if let Ok(relative) = resolved.strip_prefix(&root) {
                return Ok(relative.to_path_buf());
            }
        }

        Err(WalkError::configuration(format!(
            "{} is not under {}",
            path.display(),
            self.root.display()
        )))
    }

    /// Patterns visible to entries of the directory `dir`
    fn set_for(&mut self, dir: &[String]) -> Result<PatternSet> {
        if let Some(set) = self.sets.get(dir) {
            return Ok(set.clone());
        }

        let parent = match dir.split_last() {
            Some((_, parent)) => self.set_for(parent)?,
            None => self.base.clone(),
        };

        let dir_path = dir.iter().fold(self.root.clone(), |path, name| path.join(name));
        let mut own = Vec::new();
        let is_dir = fs::symlink_metadata(&dir_path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            // same order as a directory listing sorted by name
            let mut names = self.parser.names().to_vec();
            names.sort();
            names.dedup();

            for name in names {
                let file = dir_path.join(&name);
                match fs::symlink_metadata(&file) {
                    Ok(metadata) if !metadata.is_dir() => {
                        own.extend(self.parser.parse_file(&file, dir)?);
                    },
                    Ok(_) => {},
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
                    Err(e) => return Err(WalkError::io(file, e)),
                }
            }
        }

        let set = parent.extended(own);
        self.sets.insert(dir.to_vec(), set.clone());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> std::io::Result<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    #[test]
    fn test_hierarchical_ignore() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        write(root, ".gitignore", "*.tmp\n!important.tmp\n")?;
        write(root, "nested/.gitignore", "*.log\n!debug.log\n")?;

        let mut checker = IgnoreChecker::new(root);

        assert!(checker.check(Path::new("test.tmp"))?.is_excluded());
        assert!(matches!(
            checker.check(Path::new("important.tmp"))?,
            IgnoreResult::IncludedByNegation(_)
        ));
        assert!(checker.check(Path::new("nested/app.log"))?.is_excluded());
        assert!(!checker.check(Path::new("nested/debug.log"))?.is_excluded());
        assert!(checker.check(Path::new("nested/temp.tmp"))?.is_excluded());
        assert!(!checker.check(Path::new("app.log"))?.is_excluded());
        Ok(())
    }

    #[test]
    fn test_reports_rule_origin() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, ".gitignore", "# build output\ntarget/\n")?;
        fs::create_dir_all(root.join("target"))?;

        let mut checker = IgnoreChecker::new(root);
        let result = checker.check(Path::new("target"))?;

        let rule = result.rule().unwrap();
        assert_eq!(rule.source, "target/");
        let origin = rule.origin.as_ref().unwrap();
        assert_eq!(origin.file, root.join(".gitignore"));
        assert_eq!(origin.line, 2);
        Ok(())
    }

    #[test]
    fn test_excluded_ancestor_wins_over_deeper_rules() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, ".gitignore", "build/\n")?;
        write(root, "build/.gitignore", "!keep.txt\n")?;
        write(root, "build/keep.txt", "")?;

        let mut checker = IgnoreChecker::new(root);
        let result = checker.check(&root.join("build/keep.txt"))?;
        assert_eq!(result.rule().map(|r| r.source.as_str()), Some("build/"));
        Ok(())
    }

    #[test]
    fn test_global_excludes() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config = WalkConfig {
            exclude: vec!["*.bak".into()],
            ..WalkConfig::default()
        };

        let mut checker = IgnoreChecker::with_config(temp_dir.path(), &config);
        let result = checker.check(Path::new("old.bak"))?;
        assert!(result.is_excluded());
        assert_eq!(result.rule().unwrap().to_string(), "<exclude>:*.bak");
        Ok(())
    }

    #[test]
    fn test_rejects_paths_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut checker = IgnoreChecker::new(temp_dir.path());

        assert!(matches!(
            checker.check(Path::new("../elsewhere")),
            Err(WalkError::Configuration { .. })
        ));
        assert!(matches!(
            checker.check(Path::new("/definitely/not/below")),
            Err(WalkError::Configuration { .. })
        ));
    }

    #[test]
    fn test_absolute_path_under_unnormalized_root() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        write(temp_dir.path(), ".gitignore", "*.log\n")?;
        fs::create_dir_all(temp_dir.path().join("nested"))?;

        let root = temp_dir.path().join("nested").join("..");
        let mut checker = IgnoreChecker::new(&root);

        assert!(checker.check(&temp_dir.path().join("a.log"))?.is_excluded());
        assert!(checker.check(&temp_dir.path().join("a.txt"))?.is_visited());
        Ok(())
    }

    #[test]
    fn test_relative_root_is_resolved() {
        let checker = IgnoreChecker::new(Path::new("some/relative/root"));
        assert!(checker.root().is_absolute());
        assert!(checker.root().ends_with("some/relative/root"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_ancestor_is_unreachable() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, "real/x.log", "")?;
        std::os::unix::fs::symlink(root.join("real"), root.join("link"))?;

        let mut checker = IgnoreChecker::new(root);
        assert_eq!(
            checker.check(Path::new("link/x.log"))?,
            IgnoreResult::Unreachable(root.join("link"))
        );
        assert!(checker.check(Path::new("real/x.log"))?.is_visited());
        // the link itself is an ordinary, non-directory entry
        assert_eq!(checker.check(Path::new("link"))?, IgnoreResult::Included);

        write(root, ".gitignore", "link\n")?;
        checker.reload();
        assert!(checker.check(Path::new("link/x.log"))?.is_excluded());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_only_rule_ignores_symlinked_directory() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        write(root, ".gitignore", "link/\n")?;
        fs::create_dir_all(root.join("real"))?;
        std::os::unix::fs::symlink(root.join("real"), root.join("link"))?;

        let mut checker = IgnoreChecker::new(root);
        assert_eq!(checker.check(Path::new("link"))?, IgnoreResult::Included);
        Ok(())
    }

    #[test]
    fn test_reload() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        let mut checker = IgnoreChecker::new(root);
        assert!(!checker.check(Path::new("test.tmp"))?.is_excluded());
        assert_eq!(checker.stats(), (1, 0));

        write(root, ".gitignore", "*.tmp\n")?;
        // cached until reloaded
        assert!(!checker.check(Path::new("test.tmp"))?.is_excluded());

        checker.reload();
        assert!(checker.check(Path::new("test.tmp"))?.is_excluded());
        assert_eq!(checker.stats(), (1, 1));
        Ok(())
    }
}
