//! Entries handed to the visitor

use crate::core::types::{join_components, Components};
use std::fs::{FileType, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// A non-excluded directory entry reached by the walk
#[derive(Debug)]
pub struct Entry {
    pub(crate) path: PathBuf,
    pub(crate) components: Components,
    pub(crate) file_type: FileType,
    pub(crate) metadata: Option<Metadata>,
    pub(crate) error: Option<io::Error>,
}

impl Entry {
    /// Location of the entry: the walk root joined with its relative path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the entry
    pub fn name(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or_default()
    }

    /// Components relative to the walk root
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Relative path joined with `/`
    pub fn relative_path(&self) -> String {
        join_components(&self.components)
    }

    /// Depth below the walk root; entries of the root itself are at depth 1
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Type of the entry itself; symbolic links are not followed
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    /// Metadata, unless reading it failed
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Error met while reading the entry's metadata
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }
}
