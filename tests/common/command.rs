use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    run_git_command(dir.path(), &["-c", "init.defaultBranch=master", "init", "-q"])
        .assert()
        .success();
    // older git ignores init.defaultBranch
    run_git_command(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/master"])
        .assert()
        .success();

    dir
}

/// A repository with one commit holding `a.txt` and `dir/b.txt`
#[fixture]
pub fn committed_repository_dir(repository_dir: TempDir) -> TempDir {
    repository_dir
        .child("a.txt")
        .write_str("one")
        .expect("Failed to write a.txt");
    repository_dir
        .child("dir")
        .child("b.txt")
        .write_str("two")
        .expect("Failed to write dir/b.txt");

    git_commit(repository_dir.path(), "Initial commit");

    repository_dir
}

pub fn git_commit(dir: &Path, message: &str) {
    run_git_command(dir, &["add", "."]).assert().success();
    run_git_command(dir, &["commit", "-q", "-m", message])
        .assert()
        .success();
}

/// Trimmed standard output of a git command that must succeed
pub fn git_output(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {args:?} failed");

    String::from_utf8(output.stdout)
        .expect("git printed invalid UTF-8")
        .trim()
        .to_string()
}

pub fn run_gitviz_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitviz").expect("Failed to find gitviz binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("GITVIZ_") {
            cmd.env_remove(key);
        }
    }
    cmd.args(args);
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "C O Mitter")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .args(["-c", "commit.gpgsign=false", "-c", "gc.auto=0"])
        .args(args);
    cmd
}
