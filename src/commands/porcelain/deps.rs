use crate::areas::repository::Repository;
use crate::artifacts::diagram::dependencies::{CommitDependencies, emit_dependencies};
use crate::artifacts::log::dependencies::dependencies_in_file;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use chrono::NaiveDate;
use colored::Colorize;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct DepsOptions {
    /// Overrides the configured start date
    pub after: Option<NaiveDate>,
    /// Run PlantUML on every written diagram
    pub render: bool,
}

impl Repository {
    /// Files changed by `commit` and the dependencies each declares today
    pub fn commit_dependencies(&self, commit: &ObjectId) -> anyhow::Result<CommitDependencies> {
        let files = self.git().files_in_commit(commit)?;

        let mut dependencies = Vec::new();
        for file in &files {
            let deps = dependencies_in_file(self.path(), file)?;
            debug!(commit = %commit, file = %file, count = deps.len(), "read dependencies");
            if !deps.is_empty() {
                dependencies.push((file.clone(), deps));
            }
        }

        Ok(CommitDependencies::new(commit.clone(), files, dependencies))
    }

    /// Write `<hash>.puml` for every commit on the branch after the start date
    pub fn dependency_diagrams(&self, opts: &DepsOptions) -> anyhow::Result<()> {
        let branch = self.settings().branch_name()?;
        let after = opts.after.or(self.settings().start_date);

        let output_dir = self.settings().render_dir();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Unable to create directory {}", output_dir.display()))?;

        let revision = branch.as_ref_path();
        let commits = self
            .git()
            .commits_after(&revision.to_string_lossy(), after)?;

        for commit in &commits {
            let diagram = emit_dependencies(&self.commit_dependencies(commit)?);
            let path = output_dir.join(format!("{commit}.puml"));

            std::fs::write(&path, &diagram)
                .with_context(|| format!("Unable to write diagram to {}", path.display()))?;
            writeln!(
                self.writer(),
                "Dependency diagram written to {}",
                path.display().to_string().green()
            )?;

            if opts.render {
                self.render_diagram(&path)?;
            }
        }

        info!(commits = commits.len(), dir = %output_dir.display(), "wrote dependency diagrams");

        Ok(())
    }
}
