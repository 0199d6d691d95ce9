//! Local git execution
//!
//! The engine drives a working copy through the small set of git commands it
//! needs (`checkout`, `branch`, `cherry-pick`, `status --porcelain`, `push`).
//! [`GitBackend`] abstracts how those commands run so the orchestrator can be
//! exercised without a real repository.

mod cli;

pub use cli::GitCli;

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;

/// Outcome of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether git exited with status 0
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Combined stdout and stderr
    pub output: String,
}

impl GitOutput {
    /// A successful invocation with the given output
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            output: output.into(),
        }
    }

    /// A failed invocation with the given exit code and output
    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: output.into(),
        }
    }

    /// Turn a non-zero exit into `Error::Git`
    pub fn into_result(self, args: &[&str]) -> Result<String> {
        if self.success {
            Ok(self.output)
        } else {
            Err(Error::Git {
                command: args.join(" "),
                code: self.code,
                output: self.output.trim().to_string(),
            })
        }
    }
}

/// Runs git commands in one fixed working copy.
///
/// Implementations must not interpret the exit status: a non-zero exit is
/// returned as a `GitOutput`, and `Err` is reserved for failing to run git at
/// all. Callers own one backend per working copy and must serialize attempts
/// against the same path.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Run `git <args>` and capture its combined output
    async fn run(&self, args: &[&str]) -> Result<GitOutput>;

    /// Working directory the commands run in
    fn workdir(&self) -> &Path;
}

/// Run a git command, failing on non-zero exit
pub async fn run_git(git: &dyn GitBackend, args: &[&str]) -> Result<String> {
    git.run(args).await?.into_result(args)
}

/// Check whether a local branch exists
pub async fn branch_exists(git: &dyn GitBackend, name: &str) -> Result<bool> {
    let reference = format!("refs/heads/{name}");
    let output = git
        .run(&["rev-parse", "--verify", "--quiet", &reference])
        .await?;
    Ok(output.success)
}

/// Get the URL configured for a remote
pub async fn remote_url(git: &dyn GitBackend, remote: &str) -> Result<String> {
    let url = run_git(git, &["remote", "get-url", remote]).await?;
    Ok(url.trim().to_string())
}
