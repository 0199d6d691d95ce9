//! Repository detection from git remote URLs

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const GITHUB_HOST: &str = "github.com";

/// scp-like SSH remotes: `git@host:owner/repo.git`
static SCP_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w.-]+@)?([\w.-]+):([^/][^:]*)$").expect("valid regex")
});

/// Parse owner, repo and host from a remote URL.
///
/// Accepts HTTPS, `ssh://` and scp-like SSH forms, with or without a
/// trailing `.git`. `github.com` is reported as no custom host.
pub fn parse_repo_info(remote_url: &str) -> Result<PlatformConfig> {
    let trimmed = remote_url.trim();

    let (host, path) = if let Ok(url) = Url::parse(trimmed)
        && url.has_host()
    {
        let host = url.host_str().unwrap_or_default().to_string();
        (host, url.path().to_string())
    } else if let Some(caps) = SCP_REMOTE.captures(trimmed) {
        (caps[1].to_string(), caps[2].to_string())
    } else {
        return Err(Error::Config(format!(
            "unsupported remote URL: {remote_url}"
        )));
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let Some((owner, repo)) = path.rsplit_once('/') else {
        return Err(Error::Config(format!(
            "remote URL has no owner/repo path: {remote_url}"
        )));
    };
    if owner.is_empty() || repo.is_empty() || owner.contains('/') {
        return Err(Error::Config(format!(
            "remote URL has no owner/repo path: {remote_url}"
        )));
    }

    Ok(PlatformConfig {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: (host != GITHUB_HOST).then_some(host),
    })
}
