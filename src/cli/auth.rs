//! Auth command - check GitHub credentials against the repository

use crate::cli::style::{Stylize, check};
use anstream::println;
use pr_backport::auth::{get_github_auth, test_github_auth};
use pr_backport::config::load_config;
use pr_backport::error::Result;
use pr_backport::git::{GitCli, remote_url};
use pr_backport::platform::parse_repo_info;
use std::path::Path;

/// Run the auth command
pub async fn run_auth(path: &Path, remote: Option<&str>) -> Result<()> {
    let options = load_config(path)?.into_options(path);
    let remote = remote.unwrap_or(&options.remote);

    let git = GitCli::new(path);
    let config = parse_repo_info(&remote_url(&git, remote).await?)?;
    let auth = get_github_auth(config.host.as_deref()).await?;
    test_github_auth(&auth, &config.owner, &config.repo).await?;

    println!(
        "{} Authenticated via {} for {}",
        check(),
        auth.source.accent(),
        format!("{}/{}", config.owner, config.repo).emphasis()
    );
    Ok(())
}
