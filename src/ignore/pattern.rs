//! Compiled ignore patterns with exact .gitignore line syntax

use crate::core::types::Components;
use glob::Pattern as Glob;
use std::fmt;
use std::path::PathBuf;

/// Where a pattern was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Rule file the line came from
    pub file: PathBuf,
    /// 1-based line number within the file
    pub line: usize,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Matcher for a single path component
#[derive(Debug, Clone)]
pub enum Segment {
    /// Exact component name
    Literal(String),
    /// `*`, `?` and `[...]` wildcards within one component
    Wildcard(Glob),
    /// `**`: zero or more whole components
    AnyDirs,
}

impl Segment {
    fn matches(&self, name: &str) -> bool {
        match self {
            Segment::Literal(text) => text == name,
            Segment::Wildcard(glob) => glob.matches(name),
            Segment::AnyDirs => true,
        }
    }

    fn compile(raw: &str) -> Self {
        if raw == "**" {
            return Segment::AnyDirs;
        }

        let translated = translate(raw);
        if !translated.wildcard {
            return Segment::Literal(translated.literal);
        }

        match Glob::new(&translated.glob) {
            Ok(glob) => Segment::Wildcard(glob),
            Err(e) => {
                tracing::warn!(segment = raw, error = %e, "invalid glob, matching literally");
                Segment::Literal(raw.to_string())
            },
        }
    }
}

/// A compiled exclusion rule scoped to the directory that defined it.
///
/// Patterns are immutable once compiled; the domain in particular never
/// changes after [`Pattern::compile`].
#[derive(Debug, Clone)]
pub struct Pattern {
    segments: Vec<Segment>,
    domain: Components,
    anchored: bool,
    directory_only: bool,
    negated: bool,
    source: String,
    origin: Option<Origin>,
}

impl Pattern {
    /// Compile one rule-file line for the directory `domain`.
    ///
    /// Returns `None` for blank lines, comments and lines that hold nothing
    /// but markers (`!`, `/`). Never fails otherwise: wildcards that do not
    /// compile degrade to literal comparison.
    pub fn compile(line: &str, domain: &[String]) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut body = line;

        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        }

        let rooted = body.starts_with('/');
        if rooted {
            body = &body[1..];
        }

        let body = trim_trailing_spaces(body);

        let directory_only = body.ends_with('/');
        let body = body.strip_suffix('/').unwrap_or(body);

        let segments: Vec<Segment> = body
            .split('/')
            .filter(|s| !s.is_empty())
            .map(Segment::compile)
            .collect();
        if segments.is_empty() {
            return None;
        }

        // A slash between segments anchors the pattern to its directory.
        let anchored = rooted || segments.len() > 1;

        Some(Self {
            segments,
            domain: domain.to_vec(),
            anchored,
            directory_only,
            negated,
            source: line.to_string(),
            origin: None,
        })
    }

    /// Attach the rule file and line number this pattern was read from
    pub fn with_origin(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
        self.origin = Some(Origin {
            file: file.into(),
            line,
        });
        self
    }

    /// Whether this pattern matches `path`, given as components relative to
    /// the walk root. `is_dir` describes the last component.
    ///
    /// Only paths strictly below the pattern's domain are considered, and
    /// the whole path must be consumed: a pattern matching a directory does
    /// not match that directory's contents. Callers evaluate every ancestor
    /// on the way down, so contents of an excluded directory are never
    /// reached.
    pub fn matches(&self, path: &[String], is_dir: bool) -> bool {
        if path.len() <= self.domain.len() || !path.starts_with(&self.domain) {
            return false;
        }
        if self.directory_only && !is_dir {
            return false;
        }

        let below = &path[self.domain.len()..];
        if self.anchored {
            match_run(&self.segments, below, 0)
        } else {
            // floating patterns are a single segment and match the name
            match_run(&self.segments, below, below.len() - 1)
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// The line as written in the rule file
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{}:{}", origin, self.source),
            None => f.write_str(&self.source),
        }
    }
}

/// Match `segments` against `path[pos..]`, consuming every component.
fn match_run(segments: &[Segment], path: &[String], pos: usize) -> bool {
    match segments.split_first() {
        None => pos == path.len(),
        // trailing `**` matches everything inside, but not the directory itself
        Some((Segment::AnyDirs, [])) => pos < path.len(),
        Some((Segment::AnyDirs, rest)) => (pos..=path.len()).any(|skip| match_run(rest, path, skip)),
        Some((segment, rest)) => {
            pos < path.len() && segment.matches(&path[pos]) && match_run(rest, path, pos + 1)
        },
    }
}

/// Trailing spaces are dropped unless escaped with a backslash.
fn trim_trailing_spaces(mut body: &str) -> &str {
    while body.ends_with(' ') && !body.ends_with("\\ ") {
        body = &body[..body.len() - 1];
    }
    body
}

struct Translated {
    /// Pattern text in `glob` crate syntax
    glob: String,
    /// Segment text with escapes resolved, used when there is no wildcard
    literal: String,
    wildcard: bool,
}

/// Rewrite a gitignore segment into `glob` syntax: `\x` escapes, `[^...]`
/// negated classes, and runs of `*` collapsed to one.
fn translate(raw: &str) -> Translated {
    let chars: Vec<char> = raw.chars().collect();
    let mut glob = String::with_capacity(raw.len());
    let mut literal = String::with_capacity(raw.len());
    let mut wildcard = false;
    let mut after_star = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' if i + 1 < chars.len() => {
                let escaped = chars[i + 1].to_string();
                glob.push_str(&Glob::escape(&escaped));
                literal.push_str(&escaped);
                after_star = false;
                i += 2;
                continue;
            },
            '*' => {
                if !after_star {
                    glob.push('*');
                }
                literal.push('*');
                wildcard = true;
                after_star = true;
            },
            '?' => {
                glob.push('?');
                literal.push('?');
                wildcard = true;
                after_star = false;
            },
            '[' => {
                after_star = false;
                match class_end(&chars, i) {
                    Some(end) => {
                        glob.push('[');
                        let mut j = i + 1;
                        if chars[j] == '^' {
                            glob.push('!');
                            j += 1;
                        }
                        glob.extend(&chars[j..=end]);
                        literal.extend(&chars[i..=end]);
                        wildcard = true;
                        i = end + 1;
                        continue;
                    },
                    None => {
                        glob.push_str("[[]");
                        literal.push('[');
                    },
                }
            },
            _ => {
                glob.push_str(&Glob::escape(&c.to_string()));
                literal.push(c);
                after_star = false;
            },
        }
        i += 1;
    }

    Translated {
        glob,
        literal,
        wildcard,
    }
}

/// Index of the `]` closing the class opened at `open`, if any. A `]`
/// directly after `[`, `[!` or `[^` is a member, not the end.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if matches!(chars.get(j), Some('!') | Some('^')) {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}
