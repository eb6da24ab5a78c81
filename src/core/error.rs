//! Error types for walkrepo

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for walk and ignore operations
#[derive(Error, Debug)]
pub enum WalkError {
    /// A directory could not be listed, or an entry or rule file could not be read
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule-file parser was handed a file that is not a rule file
    #[error("File {path} is not a rule file")]
    NotRuleFile { path: PathBuf },

    /// The visitor aborted the walk
    #[error("Visitor failed at {path}: {source}")]
    Visitor {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,
}

impl WalkError {
    /// Create a new I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new not-a-rule-file error
    pub fn not_rule_file(path: impl Into<PathBuf>) -> Self {
        Self::NotRuleFile { path: path.into() }
    }

    /// Create a new visitor error
    pub fn visitor(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::Visitor {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Path the error is attached to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::NotRuleFile { path } | Self::Visitor { path, .. } => {
                Some(path)
            },
            Self::Configuration { .. } | Self::HomeDirectoryNotFound => None,
        }
    }

    /// Unwrap the error returned by the visitor, if this is one
    pub fn into_visitor_error(self) -> Option<anyhow::Error> {
        match self {
            Self::Visitor { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for walkrepo operations
pub type Result<T> = std::result::Result<T, WalkError>;
