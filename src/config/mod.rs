//! Configuration management for walkrepo
//!
//! Walk settings stored in TOML, with a user-wide file in ~/.walkrepo/config.toml

pub mod walk_config;

// Re-export commonly used items
pub use walk_config::WalkConfig;
