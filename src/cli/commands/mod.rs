//! CLI command implementations

pub mod check;
pub mod list;

use crate::config::WalkConfig;
use crate::core::error::WalkError;
use anyhow::Result;
use std::path::Path;

/// Load the configuration file named on the command line, or the user-wide one
pub fn load_config(path: Option<&Path>) -> Result<WalkConfig> {
    match path {
        Some(path) => Ok(WalkConfig::load(path)?),
        None => match WalkConfig::load_default() {
            Ok(config) => Ok(config),
            Err(WalkError::HomeDirectoryNotFound) => Ok(WalkConfig::default()),
            Err(e) => Err(e.into()),
        },
    }
}
