use flate2::Compression;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `content` as a loose object and return its hash
///
/// The content is stored as given, header included, so broken objects can be written too.
pub fn write_loose_object(repository_dir: &Path, content: &[u8]) -> String {
    let oid = format!("{:x}", Sha1::digest(content));

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(content)
        .expect("Failed to compress object");
    let compressed = encoder.finish().expect("Failed to compress object");

    let object_path = object_path(repository_dir, &oid);
    std::fs::create_dir_all(object_path.parent().expect("object path has a parent"))
        .expect("Failed to create object directory");
    std::fs::write(object_path, compressed).expect("Failed to write object");

    oid
}

pub fn object_path(repository_dir: &Path, oid: &str) -> PathBuf {
    repository_dir
        .join(".git")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..])
}

pub fn set_branch(repository_dir: &Path, branch: &str, oid: &str) {
    let ref_path = repository_dir
        .join(".git")
        .join("refs")
        .join("heads")
        .join(branch);
    std::fs::write(ref_path, format!("{oid}\n")).expect("Failed to write branch");
}
