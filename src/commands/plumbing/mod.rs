//! Plumbing commands
//!
//! - `cat-file`: print an object's type, size or parsed content
//! - `ls-tree`: list the entries of a tree or of a commit's tree

pub mod cat_file;
pub mod ls_tree;
