//! Rule file parser with exact .gitignore syntax compatibility

use crate::core::error::{Result, WalkError};
use crate::ignore::pattern::Pattern;
use std::fs;
use std::path::Path;

/// Conventional rule file name
pub const GITIGNORE: &str = ".gitignore";

/// Parser for rule files
///
/// Knows which file names count as rule files and compiles their lines into
/// patterns scoped to the directory holding the file.
#[derive(Debug, Clone)]
pub struct RuleFileParser {
    /// File names treated as rule files
    names: Vec<String>,
}

impl Default for RuleFileParser {
    fn default() -> Self {
        Self {
            names: vec![GITIGNORE.to_string()],
        }
    }
}

impl RuleFileParser {
    /// Create a parser accepting the given rule file names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is one of the accepted rule file names
    pub fn is_rule_file(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Read and compile a rule file whose directory is `domain`.
    ///
    /// Fails with [`WalkError::NotRuleFile`] when the file name is not an
    /// accepted rule file name, and with [`WalkError::Io`] when it cannot be
    /// read.
    pub fn parse_file(&self, path: &Path, domain: &[String]) -> Result<Vec<Pattern>> {
        let is_rule_file = path
            .file_name()
            .map(|name| self.is_rule_file(&name.to_string_lossy()))
            .unwrap_or(false);
        if !is_rule_file {
            return Err(WalkError::not_rule_file(path));
        }

        let bytes = fs::read(path).map_err(|e| WalkError::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);

        let patterns = parse_content(&content, domain, Some(path));
        tracing::debug!(
            file = %path.display(),
            patterns = patterns.len(),
            "loaded rule file"
        );
        Ok(patterns)
    }
}

/// Compile rule file content, one pattern per `\n`-separated line.
///
/// Blank lines and comments produce nothing. When `origin` is given each
/// pattern records it together with its 1-based line number.
pub fn parse_content(content: &str, domain: &[String], origin: Option<&Path>) -> Vec<Pattern> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| {
            let pattern = Pattern::compile(line, domain)?;
            Some(match origin {
                Some(file) => pattern.with_origin(file, index + 1),
                None => pattern,
            })
        })
        .collect()
}
