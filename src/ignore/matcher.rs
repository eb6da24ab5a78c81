//! Ordered, directory-scoped pattern sets with last-match-wins evaluation

use crate::ignore::pattern::Pattern;
use std::sync::Arc;

/// Outcome of evaluating a path against a [`PatternSet`]
#[derive(Debug, Clone, Copy)]
pub enum MatchResult<'a> {
    /// No pattern matched
    None,
    /// The last matching pattern excludes the path
    Excluded(&'a Pattern),
    /// The last matching pattern is a negation that re-includes the path
    Included(&'a Pattern),
}

impl<'a> MatchResult<'a> {
    pub fn is_excluded(&self) -> bool {
        matches!(self, MatchResult::Excluded(_))
    }

    /// The pattern that decided the outcome, if any
    pub fn pattern(&self) -> Option<&'a Pattern> {
        match *self {
            MatchResult::None => None,
            MatchResult::Excluded(p) | MatchResult::Included(p) => Some(p),
        }
    }
}

#[derive(Debug)]
struct Layer {
    patterns: Vec<Pattern>,
    parent: Option<Arc<Layer>>,
}

/// Patterns visible to one directory: everything its ancestors defined, in
/// the order it was encountered, followed by its own.
///
/// The set is a persistent chain of layers. [`PatternSet::extended`] returns
/// a new set on top of the existing one and leaves the original untouched,
/// so sibling directories that extend the same parent never observe each
/// other's patterns. Cloning is a reference-count bump.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    head: Option<Arc<Layer>>,
    len: usize,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        Self::new().extended(patterns)
    }

    /// A new set holding this set's patterns followed by `patterns`
    pub fn extended(&self, patterns: Vec<Pattern>) -> Self {
        if patterns.is_empty() {
            return self.clone();
        }

        let len = self.len + patterns.len();
        Self {
            head: Some(Arc::new(Layer {
                patterns,
                parent: self.head.clone(),
            })),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All patterns in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        let mut layers: Vec<&Layer> = self.layers().collect();
        layers.reverse();
        layers.into_iter().flat_map(|layer| layer.patterns.iter())
    }

    /// Evaluate `path` (components relative to the walk root).
    ///
    /// The last pattern in definition order that matches decides; a set with
    /// no matching pattern leaves the path included.
    pub fn matched(&self, path: &[String], is_dir: bool) -> MatchResult<'_> {
        // Scanning newest-first and stopping at the first hit gives the same
        // answer as overwriting a running decision front to back.
        let newest_first = self
            .layers()
            .flat_map(|layer| layer.patterns.iter().rev());

        for pattern in newest_first {
            if pattern.matches(path, is_dir) {
                return if pattern.is_negated() {
                    MatchResult::Included(pattern)
                } else {
                    MatchResult::Excluded(pattern)
                };
            }
        }

        MatchResult::None
    }

    pub fn is_excluded(&self, path: &[String], is_dir: bool) -> bool {
        self.matched(path, is_dir).is_excluded()
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        std::iter::successors(self.head.as_deref(), |layer| layer.parent.as_deref())
    }
}
