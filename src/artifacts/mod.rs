//! Git data structures and algorithms
//!
//! - `branch`: Branch names
//! - `core`: Settings
//! - `diagram`: PlantUML text emission and rendering
//! - `graph`: Object graph nodes and the walker that builds them
//! - `log`: Commit listing through the `git` executable
//! - `objects`: Git object types (blob, tree, commit) and their errors

pub mod branch;
pub mod core;
pub mod diagram;
pub mod graph;
pub mod log;
pub mod objects;
