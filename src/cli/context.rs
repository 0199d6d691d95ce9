//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the pick, plan and auth commands.

use pr_backport::config::{CherryPickOptions, load_config};
use pr_backport::error::Result;
use pr_backport::git::{GitCli, remote_url};
use pr_backport::platform::{PlatformService, create_platform_service, parse_repo_info};
use std::path::Path;

/// Values given on the command line, which win over config files
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    /// `--remote`
    pub remote: Option<&'a str>,
    /// `--fork-owner`
    pub fork_owner: Option<&'a str>,
}

/// Shared context for CLI commands that interact with the platform
///
/// This struct encapsulates the common setup:
/// - Resolving options from flags and config files
/// - Opening the working copy
/// - Detecting owner/repo from the remote URL
/// - Creating the authenticated platform service
pub struct CommandContext {
    /// Git backend for the working copy
    pub git: GitCli,
    /// Resolved options for this run
    pub options: CherryPickOptions,
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(path: &Path, overrides: Overrides<'_>) -> Result<Self> {
        let repo_path = path.canonicalize()?;
        let mut options = load_config(&repo_path)?.into_options(&repo_path);
        if let Some(remote) = overrides.remote {
            options.remote = remote.to_string();
        }
        if let Some(owner) = overrides.fork_owner {
            options.fork_owner = Some(owner.to_string());
        }

        let git = GitCli::new(&options.repo_path);
        let url = remote_url(&git, &options.remote).await?;
        let platform_config = parse_repo_info(&url)?;
        let platform = create_platform_service(&platform_config).await?;

        Ok(Self {
            git,
            options,
            platform,
        })
    }
}
