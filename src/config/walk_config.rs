//! Walk configuration
//!
//! Settings can be given programmatically, loaded from a TOML file, or read
//! from the user-wide `~/.walkrepo/config.toml`.

use crate::core::error::{Result, WalkError};
use crate::ignore::matcher::PatternSet;
use crate::ignore::parser::{RuleFileParser, GITIGNORE};
use crate::ignore::pattern::Pattern;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// File names read as rule files in every directory
    pub rule_files: Vec<String>,
    /// Patterns applied from the walk root before any rule file
    pub exclude: Vec<String>,
    /// Do not descend into directories deeper than this (root entries are depth 1)
    pub max_depth: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            rule_files: vec![GITIGNORE.to_string()],
            exclude: Vec::new(),
            max_depth: None,
        }
    }
}

impl WalkConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WalkError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| WalkError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Load the user-wide configuration, or the defaults if there is none
    pub fn load_default() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WalkError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            WalkError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| WalkError::io(path, e))
    }

    /// Path of the user-wide configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(WalkError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".walkrepo").join("config.toml"))
    }

    /// Rule file parser for the configured names
    pub fn parser(&self) -> RuleFileParser {
        RuleFileParser::new(self.rule_files.iter().cloned())
    }

    /// Global exclude patterns, scoped to the walk root and below every rule
    /// file in precedence
    pub fn base_patterns(&self) -> PatternSet {
        PatternSet::from_patterns(
            self.exclude
                .iter()
                .filter_map(|line| Pattern::compile(line, &[]))
                .collect(),
        )
    }
}
