use crate::areas::database::ObjectLocator;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

impl Repository {
    /// List a tree, or the tree of a commit, as `<mode> <type> <oid>\t<path>` lines
    pub fn ls_tree(&self, revision: Option<&str>, recursive: bool) -> anyhow::Result<()> {
        let oid = self.resolve_revision(revision)?;

        let tree_oid = match self.database().parse_object(&oid)? {
            ParsedObject::Commit(commit) => commit.tree_oid().clone(),
            ParsedObject::Tree(_) => oid,
            ParsedObject::Blob(_) => anyhow::bail!("{oid} is a blob, not a tree or commit"),
        };

        self.list_tree(&tree_oid, None, recursive)
    }

    fn list_tree(
        &self,
        oid: &ObjectId,
        prefix: Option<&Path>,
        recursive: bool,
    ) -> anyhow::Result<()> {
        let ParsedObject::Tree(tree) = self.database().parse_object(oid)? else {
            anyhow::bail!("{oid} is not a tree");
        };

        for entry in tree.entries() {
            let path = match prefix {
                Some(prefix) => prefix.join(&entry.name),
                None => PathBuf::from(&entry.name),
            };

            if recursive && entry.is_tree() {
                self.list_tree(&entry.oid, Some(&path), recursive)?;
            } else {
                writeln!(
                    self.writer(),
                    "{:0>6} {} {}\t{}",
                    entry.mode,
                    entry.expected_type(),
                    entry.oid,
                    path.display()
                )?;
            }
        }

        Ok(())
    }
}
