//! Per-invocation options and the optional `.backport.toml` file.
//!
//! Options are resolved once per run and passed explicitly; nothing here is
//! global. Precedence: command-line flags, then the repository's
//! `.backport.toml`, then `<config dir>/backport/config.toml`, then defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the repository root
pub const REPO_CONFIG_FILE: &str = ".backport.toml";

/// Default remote to push to
pub const DEFAULT_REMOTE: &str = "origin";

/// Options for one cherry-pick attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherryPickOptions {
    /// Local working copy the engine owns for the attempt
    pub repo_path: PathBuf,
    /// Remote the feature branch is pushed to
    pub remote: String,
    /// Owner of the fork the branch is pushed to, if not the upstream repo
    pub fork_owner: Option<String>,
    /// Let upstream maintainers push to the backport branch
    pub maintainer_can_modify: bool,
    /// Ask the original PR author to review the backport
    pub request_author_review: bool,
}

impl CherryPickOptions {
    /// Default options for a working copy
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
            remote: DEFAULT_REMOTE.to_string(),
            fork_owner: None,
            maintainer_can_modify: true,
            request_author_review: true,
        }
    }
}

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Remote to push to
    pub remote: Option<String>,
    /// Fork owner for the PR head
    pub fork_owner: Option<String>,
    /// Allow maintainers to modify the backport branch
    pub maintainer_can_modify: Option<bool>,
    /// Request review from the original author
    pub request_author_review: Option<bool>,
}

impl FileConfig {
    /// Fill unset fields from `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            remote: self.remote.or(fallback.remote),
            fork_owner: self.fork_owner.or(fallback.fork_owner),
            maintainer_can_modify: self.maintainer_can_modify.or(fallback.maintainer_can_modify),
            request_author_review: self.request_author_review.or(fallback.request_author_review),
        }
    }

    /// Resolve into options for `repo_path`
    pub fn into_options(self, repo_path: impl Into<PathBuf>) -> CherryPickOptions {
        let defaults = CherryPickOptions::new(repo_path);
        CherryPickOptions {
            remote: self.remote.unwrap_or(defaults.remote),
            fork_owner: self.fork_owner.or(defaults.fork_owner),
            maintainer_can_modify: self
                .maintainer_can_modify
                .unwrap_or(defaults.maintainer_can_modify),
            request_author_review: self
                .request_author_review
                .unwrap_or(defaults.request_author_review),
            repo_path: defaults.repo_path,
        }
    }
}

/// Load one config file. A missing file is an empty config.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Path of the per-user config file, if a config dir exists
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("backport").join("config.toml"))
}

/// Load the repository config layered over the user config
pub fn load_config(repo_path: &Path) -> Result<FileConfig> {
    let repo = load_file_config(&repo_path.join(REPO_CONFIG_FILE))?;
    let user = match user_config_path() {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };
    Ok(repo.or(user))
}
