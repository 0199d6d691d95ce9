//! Git backend that shells out to the `git` binary

use super::{GitBackend, GitOutput};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs the system `git` in a repository directory
///
/// Child processes are not killed when the calling future is dropped, so a
/// cancelled attempt never interrupts a git command that already started.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    /// Create a backend rooted at `repo_path`
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

#[async_trait]
impl GitBackend for GitCli {
    async fn run(&self, args: &[&str]) -> Result<GitOutput> {
        debug!(args = %args.join(" "), cwd = %self.repo_path.display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Git {
                command: args.join(" "),
                code: None,
                output: format!("failed to execute git: {e}"),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(code = ?output.status.code(), "git finished");
        Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            output: combined,
        })
    }

    fn workdir(&self) -> &Path {
        &self.repo_path
    }
}
