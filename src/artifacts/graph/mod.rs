//! Object graph construction
//!
//! - `node`: owned, tree-shaped graph nodes with diagram labels
//! - `walker`: resolution of a starting object into a node tree

pub mod node;
pub mod walker;
