use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::settings::Settings;
use crate::artifacts::log::git_cli::GitCli;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use tracing::debug;

/// Minimum abbreviated object ID accepted on the command line
const MIN_PREFIX_LENGTH: usize = 4;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    settings: Settings,
}

impl Repository {
    /// Open the repository named by `settings.repository_path`
    pub fn new(settings: Settings, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = settings.repository_path.canonicalize().with_context(|| {
            format!(
                "Unable to open repository at {}",
                settings.repository_path.display()
            )
        })?;

        let git_path = path.join(".git");
        if !git_path.is_dir() {
            anyhow::bail!("Not a git repository: {}", path.display());
        }

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());
        debug!(path = %path.display(), "opened repository");

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn git(&self) -> GitCli {
        GitCli::new(self.path.to_path_buf())
    }

    /// Tip of the configured branch
    pub fn branch_tip(&self) -> anyhow::Result<ObjectId> {
        self.refs.read_branch(&self.settings.branch_name()?)
    }

    /// Resolve a command-line revision
    ///
    /// Accepts a full object ID, an unambiguous abbreviation of at least four hex
    /// characters, or a branch name. Without a revision the configured branch is used.
    pub fn resolve_revision(&self, revision: Option<&str>) -> anyhow::Result<ObjectId> {
        let Some(revision) = revision else {
            return self.branch_tip();
        };

        let is_hex = revision.chars().all(|c| c.is_ascii_hexdigit());
        if is_hex && revision.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(revision.to_string());
        }

        if is_hex && revision.len() >= MIN_PREFIX_LENGTH {
            let mut candidates = self.database.find_objects_by_prefix(revision)?;
            match candidates.len() {
                1 => return Ok(candidates.remove(0)),
                0 => {}
                _ => anyhow::bail!(
                    "short object ID {} is ambiguous: {}",
                    revision,
                    candidates
                        .iter()
                        .map(ObjectId::to_short_oid)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }

        let branch_name = BranchName::try_parse(revision.to_string())
            .with_context(|| format!("Not a valid object name: {revision}"))?;
        self.refs.read_branch(&branch_name)
    }
}
