//! Commit history through the `git` executable
//!
//! Listing commits by date is delegated to `git log` rather than walked from the
//! object store, so it also sees packed history.
//!
//! - `git_cli`: commits after a date and the files each one changed
//! - `dependencies`: `import` lines of changed files as file dependencies

pub mod dependencies;
pub mod git_cli;
