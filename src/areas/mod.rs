//! Core repository components
//!
//! - `database`: Read-only loose-object store and the object locator seam
//! - `refs`: Branch reference lookup
//! - `repository`: Settings, storage and output wired together for the commands

pub mod database;
pub(crate) mod refs;
pub mod repository;
