//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Free-form headers (author, committer, gpgsig, ...)
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::error::ParseError;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::BufRead;

/// Git commit object
///
/// Parents keep their on-disk order; it is also the order in which a graph walk visits them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for a root commit, several for merges)
    parents: Vec<ObjectId>,
    /// Remaining headers in on-disk order, continuation lines joined with `\n`
    headers: Vec<(String, String)>,
    /// Commit message, trimmed
    message: String,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of a header; when a key repeats, the last occurrence wins
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> Result<Self, ParseError> {
        let mut reader = reader;
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|_| ParseError::NotUtf8)?;
        let content = String::from_utf8(content).map_err(|_| ParseError::NotUtf8)?;

        let mut lines = content.split('\n').peekable();

        let tree_line = lines.next().unwrap_or_default();
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .and_then(|oid| ObjectId::try_parse(oid.to_string()).ok())
            .ok_or_else(|| ParseError::InvalidTreeLine(tree_line.to_string()))?;

        // Parse all parent lines (there can be 0, 1, or multiple parents)
        let mut parents = Vec::new();
        while let Some(parent_line) = lines.next_if(|line| line.starts_with("parent ")) {
            let parent_oid = parent_line
                .strip_prefix("parent ")
                .and_then(|oid| ObjectId::try_parse(oid.to_string()).ok())
                .ok_or_else(|| ParseError::InvalidParentLine(parent_line.to_string()))?;
            parents.push(parent_oid);
        }

        let mut headers: Vec<(String, String)> = Vec::new();
        loop {
            let line = lines.next().ok_or(ParseError::MissingMessageSeparator)?;

            // multi-line values (gpgsig, mergetag) continue on lines starting with a space
            if let (Some(continuation), Some((_, value))) =
                (line.strip_prefix(' '), headers.last_mut())
            {
                value.push('\n');
                value.push_str(continuation);
                continue;
            }

            if line.trim().is_empty() {
                break;
            }

            let (key, value) = line.split_once(' ').unwrap_or((line, ""));
            headers.push((key.to_string(), value.to_string()));
        }

        let message = lines.collect::<Vec<&str>>().join("\n").trim().to_string();

        Ok(Commit {
            tree_oid,
            parents,
            headers,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        for (key, value) in &self.headers {
            lines.push(format!("{} {}", key, value.replace('\n', "\n ")));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
