//! Porcelain commands
//!
//! - `graph`: walk from a branch tip, write the PlantUML diagram and optionally render it
//! - `commits`: list commits after a date through `git log`
//! - `deps`: one file dependency diagram per commit after a date

pub mod commits;
pub mod deps;
pub mod graph;
