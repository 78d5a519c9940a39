use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::ParseError;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::BufRead;

pub trait Unpackable {
    /// Parse an object body; the `<type> <size>\0` header must already be consumed
    fn deserialize(reader: impl BufRead) -> Result<Self, ParseError>
    where
        Self: Sized;
}

pub trait Object {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;
}

/// Decompressed object content split into its declared type and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    object_type: ObjectType,
    body: Bytes,
}

impl RawObject {
    /// Split decompressed content at the first NUL byte and validate the header
    ///
    /// The header must read `<type> <decimal size>` and the size must equal the
    /// number of bytes that follow the NUL.
    pub fn parse(content: Bytes) -> Result<Self, ParseError> {
        let nul = content
            .iter()
            .position(|&byte| byte == b'\0')
            .ok_or(ParseError::MissingHeaderTerminator)?;

        let header = &content[..nul];
        let invalid_header = || ParseError::InvalidHeader(String::from_utf8_lossy(header).into_owned());
        let header = std::str::from_utf8(header).map_err(|_| invalid_header())?;

        let (kind, size) = header.split_once(' ').ok_or_else(invalid_header)?;
        let object_type = ObjectType::try_from(kind)
            .map_err(|_| ParseError::UnknownType(kind.to_string()))?;

        if size.is_empty() || !size.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid_header());
        }
        let declared = size.parse::<usize>().map_err(|_| invalid_header())?;

        let body = content.slice(nul + 1..);
        if declared != body.len() {
            return Err(ParseError::SizeMismatch {
                declared,
                actual: body.len(),
            });
        }

        Ok(RawObject { object_type, body })
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body according to the declared type
    pub fn into_parsed(self) -> Result<ParsedObject, ParseError> {
        let reader = &self.body[..];

        match self.object_type {
            ObjectType::Blob => Ok(ParsedObject::Blob(Blob::new(self.body.clone()))),
            ObjectType::Tree => Ok(ParsedObject::Tree(Tree::deserialize(reader)?)),
            ObjectType::Commit => Ok(ParsedObject::Commit(Commit::deserialize(reader)?)),
        }
    }
}

pub enum ParsedObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl ParsedObject {
    pub fn as_object(&self) -> &dyn Object {
        match self {
            ParsedObject::Blob(blob) => blob,
            ParsedObject::Tree(tree) => tree,
            ParsedObject::Commit(commit) => commit,
        }
    }
}
