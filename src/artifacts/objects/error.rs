//! Errors raised while reading objects from the loose-object store
//!
//! [`ParseError`] describes a grammar violation in decompressed content and knows nothing
//! about where the bytes came from. [`ObjectError`] is what callers see: every variant
//! names the object that failed so a broken repository can be diagnosed from the message.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Violations of the loose-object grammar
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing NUL byte after object header")]
    MissingHeaderTerminator,

    #[error("invalid object header {0:?}")]
    InvalidHeader(String),

    #[error("unknown object type {0:?}")]
    UnknownType(String),

    #[error("header declares {declared} bytes but body has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("truncated tree entry at byte {offset}: {reason}")]
    TruncatedTreeEntry { offset: usize, reason: &'static str },

    #[error("invalid tree entry mode {0:?}")]
    InvalidMode(String),

    #[error("commit body is not valid UTF-8")]
    NotUtf8,

    #[error("invalid tree line {0:?}")]
    InvalidTreeLine(String),

    #[error("invalid parent line {0:?}")]
    InvalidParentLine(String),

    #[error("missing blank line between commit headers and message")]
    MissingMessageSeparator,
}

/// Failures while locating, decompressing, parsing or walking an object
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("object {oid} not found at {}", path.display())]
    NotFound { oid: ObjectId, path: PathBuf },

    #[error("object {oid} is corrupt: {source}")]
    Corrupt {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error("object {oid} is malformed: {source}")]
    Malformed {
        oid: ObjectId,
        #[source]
        source: ParseError,
    },

    #[error("unable to read object {oid} from {}: {source}", path.display())]
    Io {
        oid: ObjectId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("object {oid} references itself through its own ancestry")]
    Cycle { oid: ObjectId },

    #[error("object {oid} is deeper than the configured limit of {limit}")]
    DepthExceeded { oid: ObjectId, limit: usize },
}

impl ObjectError {
    pub fn malformed(oid: &ObjectId, source: ParseError) -> Self {
        ObjectError::Malformed {
            oid: oid.clone(),
            source,
        }
    }

    /// The object the failure is attributed to
    pub fn oid(&self) -> &ObjectId {
        match self {
            ObjectError::NotFound { oid, .. }
            | ObjectError::Corrupt { oid, .. }
            | ObjectError::Malformed { oid, .. }
            | ObjectError::Io { oid, .. }
            | ObjectError::Cycle { oid }
            | ObjectError::DepthExceeded { oid, .. } => oid,
        }
    }
}
