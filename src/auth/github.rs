//! GitHub token discovery

use super::AuthSource;
use crate::error::{Error, Result};
use crate::platform::GitHubService;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// Custom host, if any
    pub host: Option<String>,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .field("host", &self.host)
            .finish()
    }
}

/// Look up a token in the environment
fn token_from_env() -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

/// Ask the `gh` CLI for its token
async fn token_from_gh(host: Option<&str>) -> Option<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    let output = cmd
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        debug!(status = ?output.status.code(), "gh auth token failed");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Resolve GitHub credentials: `GH_TOKEN`, `GITHUB_TOKEN`, then `gh auth token`
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_env() {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            host: host.map(String::from),
        });
    }

    if let Some(token) = token_from_gh(host).await {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
            host: host.map(String::from),
        });
    }

    Err(Error::Auth(
        "no GitHub token found: set GH_TOKEN or GITHUB_TOKEN, or run 'gh auth login'".to_string(),
    ))
}

/// Check that a token can read the given repository
pub async fn test_github_auth(config: &GitHubAuthConfig, owner: &str, repo: &str) -> Result<()> {
    let service = GitHubService::new(
        &config.token,
        owner.to_string(),
        repo.to_string(),
        config.host.clone(),
    )?;
    service
        .check_access()
        .await
        .map_err(|e| Error::Auth(e.to_string()))
}
