//! Read-only view of the surrounding git checkout.

use std::path::{Path, PathBuf};
use std::process::Command;

pub trait GitInspector {
    fn is_inside_repo(&self) -> bool;

    /// Current branch name. `None` when detached, outside a repo, or git is
    /// unavailable.
    fn current_branch(&self) -> Option<String>;
}

/// Shells out to the `git` binary found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run git with `args` and return trimmed stdout. Returns None on any error.
    fn run(&self, args: &[&str]) -> Option<String> {
        let git = which::which("git").ok()?;
        let output = Command::new(git)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .ok()?;
        if !output.status.success() {
            tracing::debug!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }
        let out = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

impl GitInspector for GitCli {
    fn is_inside_repo(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"]).as_deref() == Some("true")
    }

    fn current_branch(&self) -> Option<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .filter(|b| b != "HEAD")
    }
}

/// Fixed answers, for callers that already know the git state.
#[derive(Debug, Clone, Default)]
pub struct StaticGit {
    pub inside_repo: bool,
    pub branch: Option<String>,
}

impl StaticGit {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn on_branch(branch: impl Into<String>) -> Self {
        Self {
            inside_repo: true,
            branch: Some(branch.into()),
        }
    }
}

impl GitInspector for StaticGit {
    fn is_inside_repo(&self) -> bool {
        self.inside_repo
    }

    fn current_branch(&self) -> Option<String> {
        self.branch.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path());
        // The temp dir may itself sit inside a checkout on some machines.
        if !git.is_inside_repo() {
            assert!(git.current_branch().is_none());
        }
    }

    #[test]
    fn static_git_reports_fixed_values() {
        let git = StaticGit::on_branch("002-auth");
        assert!(git.is_inside_repo());
        assert_eq!(git.current_branch().as_deref(), Some("002-auth"));

        let none = StaticGit::none();
        assert!(!none.is_inside_repo());
        assert!(none.current_branch().is_none());
    }
}
