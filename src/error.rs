//! Error types for pr-backport

use crate::types::CherryPickStage;
use thiserror::Error;

/// Result type alias for pr-backport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or invalid input (unmerged PR, empty commit list, missing branch)
    #[error("invalid input: {0}")]
    Validation(String),

    /// A source-hosting API call failed or returned an unexpected payload
    #[error("{operation} failed for {target}: {message}")]
    Api {
        /// API operation that failed (e.g. `get_commit`)
        operation: &'static str,
        /// Identifiers of the object involved (`owner/repo@sha`, `owner/repo#number`)
        target: String,
        /// Underlying failure
        message: String,
    },

    /// No parent of the merge commit carries the PR's final tree
    #[error(
        "no parent of merge commit {merge_commit} matches the PR tree ({parents_searched} parents searched)"
    )]
    AmbiguousMergeMode {
        /// Merge commit SHA
        merge_commit: String,
        /// Number of parents compared
        parents_searched: usize,
    },

    /// Branch history and PR history diverged while walking rebased commits
    #[error(
        "rebased history does not match PR commit {index}: PR tree {pr_tree}, branch commit {branch_commit} has tree {branch_tree}"
    )]
    ReconstructionMismatch {
        /// Zero-based position in the PR commit list
        index: usize,
        /// Tree SHA of the PR commit
        pr_tree: String,
        /// Branch commit compared against
        branch_commit: String,
        /// Tree SHA of the branch commit
        branch_tree: String,
    },

    /// git exited non-zero for a reason other than conflicts
    #[error("git {command} failed{}: {output}", .code.map(|c| format!(" (exit {c})")).unwrap_or_default())]
    Git {
        /// Arguments passed to git
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Combined stdout/stderr
        output: String,
    },

    /// Cherry-pick left unmerged paths behind
    #[error("cherry-pick has unresolved conflicts:\n{status}")]
    Conflict {
        /// Raw `git status --porcelain` output
        status: String,
    },

    /// Pushing the feature branch or opening the PR failed
    #[error("publish failed: {0}")]
    Publish(String),

    /// Authentication error
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cherry-pick attempt failed while moving to `stage`
    #[error("{stage} failed: {source}")]
    Stage {
        /// Stage the attempt was trying to reach
        stage: CherryPickStage,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the stage it occurred in.
    ///
    /// Already-wrapped errors are returned unchanged so the innermost stage wins.
    #[must_use]
    pub fn at_stage(self, stage: CherryPickStage) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with stage context stripped
    pub fn root(&self) -> &Self {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// The stage at which a cherry-pick attempt failed, if known
    pub const fn stage(&self) -> Option<CherryPickStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Build an `Api` error from any displayable failure
    pub fn api(operation: &'static str, target: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Api {
            operation,
            target: target.into(),
            message: err.to_string(),
        }
    }
}
