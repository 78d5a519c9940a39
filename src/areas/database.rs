//! Read-only access to the loose-object store
//!
//! [`ObjectLocator`] is the seam between the object graph walk and the storage: it turns
//! an object ID into the compressed bytes of its loose-object file. Decompression and
//! parsing are layered on top as provided methods, so any locator (the on-disk
//! [`Database`] or an in-memory map in tests) can feed the walker.

use crate::artifacts::objects::error::ObjectError;
use crate::artifacts::objects::object::{ParsedObject, RawObject};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::io;
use std::path::{Path, PathBuf};

pub trait ObjectLocator {
    /// Read the still-compressed content of a loose object
    fn read(&self, object_id: &ObjectId) -> Result<Bytes, ObjectError>;

    /// Read, decompress and split an object into type and body
    fn load(&self, object_id: &ObjectId) -> Result<RawObject, ObjectError> {
        let compressed = self.read(object_id)?;

        let content = decompress(&compressed).map_err(|source| ObjectError::Corrupt {
            oid: object_id.clone(),
            source,
        })?;

        RawObject::parse(content).map_err(|source| ObjectError::malformed(object_id, source))
    }

    /// Load an object and parse its body according to its type
    fn parse_object(&self, object_id: &ObjectId) -> Result<ParsedObject, ObjectError> {
        self.load(object_id)?
            .into_parsed()
            .map_err(|source| ObjectError::malformed(object_id, source))
    }
}

/// Size of the scratch buffer each inflate step writes into
const INFLATE_CHUNK: usize = 32 * 1024;

/// Inflate a zlib stream in one go
///
/// Truncated or invalid streams fail as a whole; no partial content is returned.
/// Bytes after the end of the zlib stream are ignored.
pub fn decompress(data: &[u8]) -> io::Result<Bytes> {
    let mut inflater = Decompress::new(true);
    let mut scratch = vec![0u8; INFLATE_CHUNK];
    let mut decompressed_content = Vec::with_capacity(data.len().saturating_mul(4));
    let mut in_pos = 0;

    loop {
        let before_in = inflater.total_in();
        let before_out = inflater.total_out();

        let status = inflater
            .decompress(&data[in_pos..], &mut scratch, FlushDecompress::None)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        let consumed = usize::try_from(inflater.total_in() - before_in).map_err(io::Error::other)?;
        let produced =
            usize::try_from(inflater.total_out() - before_out).map_err(io::Error::other)?;
        in_pos += consumed;
        decompressed_content.extend_from_slice(&scratch[..produced]);

        match status {
            Status::StreamEnd => return Ok(decompressed_content.into()),
            Status::Ok | Status::BufError if consumed == 0 && produced == 0 => {
                let kind = if in_pos >= data.len() {
                    io::ErrorKind::UnexpectedEof
                } else {
                    io::ErrorKind::InvalidData
                };
                return Err(io::Error::new(kind, "zlib stream ends before its final block"));
            }
            Status::Ok | Status::BufError => {}
        }
    }
}

/// Loose objects under `.git/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Path of the loose-object file for `object_id`, which must exist
    pub fn locate(&self, object_id: &ObjectId) -> Result<PathBuf, ObjectError> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::metadata(&object_path) {
            Ok(metadata) if metadata.is_file() => Ok(object_path),
            Ok(_) => Err(ObjectError::Io {
                oid: object_id.clone(),
                path: object_path,
                source: io::Error::other("not a regular file"),
            }),
            Err(err) => Err(Self::read_error(object_id, object_path, err)),
        }
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated OIDs typed on the command line. An empty result
    /// means no match, more than one result means the prefix is ambiguous.
    ///
    /// Prefixes shorter than 2 characters would require scanning every fan-out
    /// directory and are rejected by the caller.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2
            || prefix.len() > OBJECT_ID_LENGTH
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
        {
            anyhow::bail!("object prefix must be 2 to 40 hex characters: {prefix}");
        }

        let mut matches = Vec::new();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)? {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix) {
                    if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    fn read_error(object_id: &ObjectId, object_path: PathBuf, err: io::Error) -> ObjectError {
        match err.kind() {
            io::ErrorKind::NotFound => ObjectError::NotFound {
                oid: object_id.clone(),
                path: object_path,
            },
            _ => ObjectError::Io {
                oid: object_id.clone(),
                path: object_path,
                source: err,
            },
        }
    }
}

impl ObjectLocator for Database {
    fn read(&self, object_id: &ObjectId) -> Result<Bytes, ObjectError> {
        let object_path = self.locate(object_id)?;

        // the handle is closed before returning, so deep walks hold no open files
        std::fs::read(&object_path)
            .map(Bytes::from)
            .map_err(|err| Self::read_error(object_id, object_path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::error::ParseError;
    use crate::artifacts::objects::object_type::ObjectType;
    use assert_fs::TempDir;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    const OID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    fn compress(content: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap()
    }

    fn store(dir: &TempDir, oid: &ObjectId, raw: &[u8]) {
        let path = dir.path().join(oid.to_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, raw).unwrap();
    }

    fn database(dir: &TempDir) -> Database {
        Database::new(dir.path().to_path_buf().into_boxed_path())
    }

    #[test]
    fn test_decompress_round_trip_and_corruption() {
        assert_eq!(&decompress(&compress(b"blob 0\0")).unwrap()[..], b"blob 0\0");
        assert!(decompress(b"definitely not zlib").is_err());

        let mut truncated = compress(b"tree 0\0");
        truncated.truncate(truncated.len() / 2);
        assert!(decompress(&truncated).is_err());
    }

    #[test]
    fn test_decompress_output_much_larger_than_input() {
        let zeros = vec![0u8; 5 * 1024 * 1024];
        let compressed = compress(&zeros);
        assert!(compressed.len() * 100 < zeros.len());

        let mut truncated = compressed.clone();
        truncated.truncate(truncated.len() - 8);
        assert_eq!(
            decompress(&truncated).unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );

        assert_eq!(decompress(&compressed).unwrap().len(), zeros.len());
    }

    #[test]
    fn test_load_highly_compressible_blob() {
        let dir = TempDir::new().unwrap();
        let line = "    let value = compute(&input).expect(\"computes\");\n";
        let body = line.repeat(40);
        let content = format!("blob {}\0{body}", body.len());
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        store(&dir, &oid, &compress(content.as_bytes()));

        let raw = database(&dir).load(&oid).unwrap();

        assert_eq!(raw.object_type(), ObjectType::Blob);
        assert_eq!(&raw.body()[..], body.as_bytes());
    }

    #[test]
    fn test_load_empty_blob() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        store(&dir, &oid, &compress(b"blob 0\0"));

        let raw = database(&dir).load(&oid).unwrap();

        assert_eq!(raw.object_type(), ObjectType::Blob);
        assert!(raw.body().is_empty());
    }

    #[test]
    fn test_missing_object_is_not_found() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();

        let err = database(&dir).load(&oid).unwrap_err();

        assert!(matches!(err, ObjectError::NotFound { .. }));
        assert_eq!(err.oid(), &oid);
        assert!(err.to_string().contains(OID));
    }

    #[test]
    fn test_directory_in_place_of_object_is_io_error() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        std::fs::create_dir_all(dir.path().join(oid.to_path())).unwrap();

        assert!(matches!(
            database(&dir).load(&oid),
            Err(ObjectError::Io { .. })
        ));
    }

    #[test]
    fn test_corrupt_object() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        store(&dir, &oid, b"garbage");

        assert!(matches!(
            database(&dir).load(&oid),
            Err(ObjectError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_malformed_object_names_the_object() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        store(&dir, &oid, &compress(b"blob 3\0hello"));

        match database(&dir).load(&oid) {
            Err(ObjectError::Malformed { oid: failed, source }) => {
                assert_eq!(failed, oid);
                assert_eq!(
                    source,
                    ParseError::SizeMismatch {
                        declared: 3,
                        actual: 5
                    }
                );
            }
            other => panic!("expected malformed object, got {other:?}"),
        }
    }

    #[test]
    fn test_find_objects_by_prefix() {
        let dir = TempDir::new().unwrap();
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        store(&dir, &oid, &compress(b"blob 0\0"));

        let database = database(&dir);
        assert_eq!(database.find_objects_by_prefix("e69d").unwrap(), vec![oid]);
        assert!(database.find_objects_by_prefix("e6a").unwrap().is_empty());
        assert!(database.find_objects_by_prefix("e").is_err());
    }
}
