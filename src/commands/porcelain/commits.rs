use crate::areas::repository::Repository;
use chrono::NaiveDate;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct CommitsOptions {
    /// Overrides the configured start date
    pub after: Option<NaiveDate>,
    /// Also list the paths each commit changed
    pub files: bool,
}

impl Repository {
    pub fn commits(&self, opts: &CommitsOptions) -> anyhow::Result<()> {
        let branch = self.settings().branch_name()?;
        let after = opts.after.or(self.settings().start_date);
        let git = self.git();

        let revision = branch.as_ref_path();
        for commit in git.commits_after(&revision.to_string_lossy(), after)? {
            writeln!(self.writer(), "{}", commit.as_ref().yellow())?;

            if opts.files {
                for file in git.files_in_commit(&commit)? {
                    writeln!(self.writer(), "    {file}")?;
                }
            }
        }

        Ok(())
    }
}
