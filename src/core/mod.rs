//! Core types and utilities for walkrepo
//!
//! This module contains the error type and the path helpers
//! used throughout the system.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{Result, WalkError};
pub use types::{join_components, split_components, Components};
