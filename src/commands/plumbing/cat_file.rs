use crate::areas::database::ObjectLocator;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ParsedObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Parsed content
    Pretty,
    /// Object type only
    Type,
    /// Body size in bytes
    Size,
}

impl Repository {
    pub fn cat_file(&self, revision: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = self.resolve_revision(Some(revision))?;

        match mode {
            CatFileMode::Type => {
                let object = self.database().load(&object_id)?;
                writeln!(self.writer(), "{}", object.object_type())?;
            }
            CatFileMode::Size => {
                let object = self.database().load(&object_id)?;
                writeln!(self.writer(), "{}", object.body().len())?;
            }
            CatFileMode::Pretty => match self.database().parse_object(&object_id)? {
                // blob bytes go out untouched, binary content included
                ParsedObject::Blob(blob) => self.writer().write_all(blob.content())?,
                object => writeln!(self.writer(), "{}", object.as_object().display())?,
            },
        }

        Ok(())
    }
}
