//! Source-control metadata for a PSDK checkout.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Branch placeholder used when HEAD is detached.
pub const DETACHED_BRANCH: &str = "!detached";

/// Read-only view of a git working tree.
pub trait GitInfo {
    /// Current branch name; empty when detached or unavailable.
    fn current_branch(&self, dir: &Path) -> String;

    /// `log --oneline -n 1` of the checkout; empty when unavailable.
    fn last_commit_line(&self, dir: &Path) -> String;
}

/// `GitInfo` backed by the `git` executable on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitInfo for GitCli {
    fn current_branch(&self, dir: &Path) -> String {
        run_git(dir, &["branch", "--show-current"])
    }

    fn last_commit_line(&self, dir: &Path) -> String {
        run_git(dir, &["log", "--oneline", "-n", "1"])
    }
}

fn run_git(dir: &Path, args: &[&str]) -> String {
    match Command::new("git").args(args).current_dir(dir).output() {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        Ok(out) => {
            debug!(?args, status = %out.status, "git exited unsuccessfully");
            String::new()
        }
        Err(err) => {
            debug!(?args, %err, "failed to run git");
            String::new()
        }
    }
}

/// Whether `dir` or its parent holds a `.git` directory.
pub fn is_git_checkout(dir: &Path) -> bool {
    dir.join(".git").is_dir() || dir.join("..").join(".git").is_dir()
}

/// `[<branch>] <commit>` for the checkout at `dir`, or an empty string outside git.
pub fn load_git_data(dir: &Path, git: &dyn GitInfo) -> String {
    if !is_git_checkout(dir) {
        return String::new();
    }

    let commit = git.last_commit_line(dir);
    let branch = git.current_branch(dir);
    let branch = branch.trim();
    let branch = if branch.is_empty() { DETACHED_BRANCH } else { branch };
    format!("[{branch}] {}", commit.trim())
}
