//! Core types for pr-backport

use serde::{Deserialize, Serialize};

/// Read-only view of the merged pull request being backported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
    /// Login of the PR author
    pub author: String,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Head branch name
    pub head_ref: String,
    /// Base branch the PR was merged into
    pub base_ref: String,
    /// SHA of the commit the PR produced on its base branch
    pub merge_commit_sha: String,
}

/// Commit metadata as seen by the source-hosting API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit SHA
    pub sha: String,
    /// SHA of the commit's root tree
    pub tree_sha: String,
    /// Parent commit SHAs, in order
    pub parent_shas: Vec<String>,
}

impl CommitRecord {
    /// Whether this commit has more than one parent
    pub fn is_merge(&self) -> bool {
        self.parent_shas.len() > 1
    }

    /// First parent (mainline) SHA, if any
    pub fn first_parent(&self) -> Option<&str> {
        self.parent_shas.first().map(String::as_str)
    }
}

/// How a pull request was integrated into its base branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergeMode {
    /// All commits condensed into one commit on the base branch
    Squash,
    /// A merge commit joins the feature branch into the base branch
    Merge,
    /// Each commit replayed individually onto the base branch
    Rebase,
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// A pull request created on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name (may be `owner:branch` for forks)
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Orchestrator states for one cherry-pick attempt.
///
/// Success runs `Initialized` through `Published`; exactly one of
/// `PatchTreeFound`, `CommitsReconstructed` or `Ready` is visited depending on
/// the merge mode. A failed attempt is never resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CherryPickStage {
    /// Nothing has happened yet
    Initialized,
    /// The PR and its commits were read from the platform
    CommitsRead,
    /// The merge mode was decided
    ModeClassified,
    /// Merge mode: the mainline parent was located
    PatchTreeFound,
    /// Rebase mode: the rebased commits were recovered
    CommitsReconstructed,
    /// Squash mode: the plan is ready as-is
    Ready,
    /// The feature branch exists and is checked out
    BranchCreated,
    /// The planned commits were applied
    Cherrypicked,
    /// The feature branch was pushed
    Pushed,
    /// The backport PR was opened
    Published,
}

impl std::fmt::Display for CherryPickStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Initialized => "initialize",
            Self::CommitsRead => "read commits",
            Self::ModeClassified => "classify merge mode",
            Self::PatchTreeFound => "locate patch tree",
            Self::CommitsReconstructed => "reconstruct rebased commits",
            Self::Ready => "prepare plan",
            Self::BranchCreated => "create branch",
            Self::Cherrypicked => "cherry-pick",
            Self::Pushed => "push",
            Self::Published => "open pull request",
        };
        f.write_str(name)
    }
}
