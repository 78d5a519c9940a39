//! Object graph visualisation for git repositories
//!
//! - `areas`: the repository on disk (object database, refs)
//! - `artifacts`: object parsing, graph walking and diagram output
//! - `commands`: the operations behind each CLI subcommand

pub mod areas;
pub mod artifacts;
pub mod commands;
