//! Git object types and parsing
//!
//! Git stores all content as objects identified by SHA-1 hashes. Three kinds are read here:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (tree, parent commits, headers, message)
//!
//! A decompressed loose object has the layout `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod error;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = OBJECT_ID_LENGTH / 2;
