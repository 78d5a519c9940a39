use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use chrono::NaiveDate;
use derive_new::new;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Runs `git -C <repository> ...` and parses its line-oriented output
#[derive(Debug, Clone, new)]
pub struct GitCli {
    repository: PathBuf,
}

impl GitCli {
    /// Commits reachable from `revision`, newest first, optionally limited to those
    /// committed after `after`
    pub fn commits_after(
        &self,
        revision: &str,
        after: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut args = vec!["log".to_string(), "--pretty=format:%H".to_string()];
        if let Some(date) = after {
            args.push(format!("--after={}", date.format("%Y-%m-%d")));
        }
        args.push(revision.to_string());
        args.push("--".to_string());

        self.run(&args)?
            .into_iter()
            .map(ObjectId::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()
            .context("git log printed an invalid commit id")
    }

    /// Paths changed by a commit relative to its first parent
    pub fn files_in_commit(&self, commit: &ObjectId) -> anyhow::Result<Vec<String>> {
        self.run(&[
            "diff-tree".to_string(),
            "--no-commit-id".to_string(),
            "--name-only".to_string(),
            "-r".to_string(),
            "--root".to_string(),
            commit.to_string(),
        ])
    }

    fn run(&self, args: &[String]) -> anyhow::Result<Vec<String>> {
        debug!(repository = %self.repository.display(), ?args, "running git");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repository)
            .args(args)
            .output()
            .context("Unable to run git")?;

        if !output.status.success() {
            anyhow::bail!(
                "git {} failed with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8(output.stdout).context("git printed invalid UTF-8")?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
