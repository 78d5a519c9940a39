//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files (blobs),
//! subdirectories (other trees) and submodules (commits), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! There is no entry count or length prefix; entries follow each other until the body
//! is exhausted.

use crate::artifacts::objects::error::ParseError;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;
use std::io::BufRead;

const DIRECTORY_MODE: &str = "40000";
const GITLINK_MODE: &str = "160000";

/// One named entry of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: String,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode == DIRECTORY_MODE
    }

    /// Kind of object the entry is expected to point at, judged by its mode
    ///
    /// Submodule entries (`160000`) point at commits of another repository.
    pub fn expected_type(&self) -> ObjectType {
        match self.mode.as_str() {
            DIRECTORY_MODE => ObjectType::Tree,
            GITLINK_MODE => ObjectType::Commit,
            _ => ObjectType::Blob,
        }
    }
}

/// Git tree object with its entries in on-disk order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        let mut reader = reader;
        let mut offset = 0;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        let truncated = |offset, reason| ParseError::TruncatedTreeEntry { offset, reason };

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader
                .read_until(b' ', &mut mode_bytes)
                .map_err(|_| truncated(offset, "unreadable mode"))?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(truncated(offset, "missing space after mode"));
            }

            let mode = String::from_utf8_lossy(&mode_bytes).into_owned();
            if mode.is_empty() || !mode.bytes().all(|byte| (b'0'..=b'7').contains(&byte)) {
                return Err(ParseError::InvalidMode(mode));
            }

            // Read "name\0"
            name_bytes.clear();
            let m = reader
                .read_until(b'\0', &mut name_bytes)
                .map_err(|_| truncated(offset, "unreadable name"))?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(truncated(offset, "missing NUL after name"));
            }
            let name = String::from_utf8_lossy(&name_bytes).into_owned();

            let oid = ObjectId::read_h40_from(&mut reader)
                .map_err(|_| truncated(offset, "object id shorter than 20 bytes"))?;

            offset += n + m + crate::artifacts::objects::OBJECT_ID_BYTES;
            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode,
                    entry.expected_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
