//! Command implementations
//!
//! - `plumbing`: direct object inspection (cat-file, ls-tree)
//! - `porcelain`: the object graph diagram and commit listing
//!
//! Every command is an inherent method on `Repository` and writes to its writer.

pub mod plumbing;
pub mod porcelain;
