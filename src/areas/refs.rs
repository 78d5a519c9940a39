//! Branch references
//!
//! Only direct branch refs are read: `refs/heads/<name>` files containing a single
//! 40-character SHA-1. Symbolic refs and packed refs are not followed.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.git` directory
    path: Box<Path>,
}

impl Refs {
    /// Read the commit a branch points at
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let ref_path = self.path.join(branch_name.as_ref_path());

        let content = std::fs::read_to_string(&ref_path).with_context(|| {
            format!(
                "Unable to read branch '{}' at {}",
                branch_name,
                ref_path.display()
            )
        })?;

        let oid = content.lines().next().unwrap_or_default().trim();
        ObjectId::try_parse(oid.to_string())
            .with_context(|| format!("Branch '{branch_name}' does not contain an object ID"))
    }
}
