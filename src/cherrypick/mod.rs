//! Cherry-pick engine for backporting merged PRs
//!
//! Three-phase pattern:
//! 1. Gather - read the PR and its commits (effectful, bounded)
//! 2. Plan - classify the merge mode and build a `CherryPickPlan`
//! 3. Execute - branch, cherry-pick, push and open the backport PR (effectful)
//!
//! [`CherryPicker`] sequences the phases; each step is also usable on its own.

mod branch;
mod classify;
mod execute;
mod graph;
mod picker;
mod plan;
mod publish;
mod reconstruct;

pub use branch::{FeatureBranch, create_branch, feature_branch_name};
pub use classify::{classify_merge_mode, locate_patch_tree};
pub use execute::{cherrypick_commits, cherrypick_merge_commit, execute_plan, unmerged_paths};
pub use graph::CommitGraphReader;
pub use picker::{CherryPickOutcome, CherryPicker};
pub use plan::{CherryPickPlan, create_cherry_pick_plan};
pub use publish::{backport_body, backport_title, create_pull_request, push_feature_branch};
pub use reconstruct::reconstruct_rebase_commits;

use crate::types::CherryPickStage;
use async_trait::async_trait;

/// Progress callback for reporting orchestrator state transitions
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called each time the attempt reaches a new stage
    async fn on_stage(&self, stage: CherryPickStage);

    /// Called with free-form status messages
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage(&self, _stage: CherryPickStage) {}

    async fn on_message(&self, _message: &str) {}
}
