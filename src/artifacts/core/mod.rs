//! Shared utilities
//!
//! - `settings`: configuration file, environment and defaults

pub mod settings;
