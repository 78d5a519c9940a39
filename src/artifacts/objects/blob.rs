//! Git blob object
//!
//! Blobs store file content. They carry no name or mode; those live in the tree
//! entry that points at the blob.

use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
