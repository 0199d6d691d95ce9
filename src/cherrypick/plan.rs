//! Cherry-pick planning
//!
//! A `CherryPickPlan` says which commits to replay and how. Plans are built
//! from the PR's history only; nothing here touches the working copy.

use super::classify::{classify_merge_mode, locate_patch_tree};
use super::graph::CommitGraphReader;
use super::reconstruct::reconstruct_rebase_commits;
use super::ProgressCallback;
use crate::error::{Error, Result};
use crate::types::{CherryPickStage, CommitRecord, MergeMode, PullRequestRef};
use serde::Serialize;

/// The commits to replay for one backport
///
/// Invariants: `commit_shas` is never empty and reads oldest to newest;
/// `mainline_parent` is set exactly when the mode is `Merge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CherryPickPlan {
    mode: MergeMode,
    commit_shas: Vec<String>,
    mainline_parent: Option<usize>,
}

impl CherryPickPlan {
    /// Squash: replay the single commit the PR produced
    pub fn squash(merge_commit_sha: impl Into<String>) -> Self {
        Self {
            mode: MergeMode::Squash,
            commit_shas: vec![merge_commit_sha.into()],
            mainline_parent: None,
        }
    }

    /// Merge: replay the merge commit against the given parent index
    pub fn merge(merge_commit_sha: impl Into<String>, mainline_parent: usize) -> Self {
        Self {
            mode: MergeMode::Merge,
            commit_shas: vec![merge_commit_sha.into()],
            mainline_parent: Some(mainline_parent),
        }
    }

    /// Rebase: replay each rebased commit, oldest first
    pub fn rebase(commit_shas: Vec<String>) -> Result<Self> {
        if commit_shas.is_empty() {
            return Err(Error::Validation(
                "rebase plan needs at least one commit".to_string(),
            ));
        }
        Ok(Self {
            mode: MergeMode::Rebase,
            commit_shas,
            mainline_parent: None,
        })
    }

    /// How the PR was merged
    pub const fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Commits to cherry-pick, oldest first
    pub fn commit_shas(&self) -> &[String] {
        &self.commit_shas
    }

    /// Parent index passed to `cherry-pick -m` (merge mode only)
    pub const fn mainline_parent(&self) -> Option<usize> {
        self.mainline_parent
    }
}

impl std::fmt::Display for CherryPickPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} commit(s)", self.mode, self.commit_shas.len())?;
        if let Some(parent) = self.mainline_parent {
            write!(f, " with mainline {parent}")?;
        }
        Ok(())
    }
}

/// Build the plan for a merged PR.
///
/// Reports `ModeClassified` and then one of `PatchTreeFound`,
/// `CommitsReconstructed` or `Ready`. Errors carry the stage they failed to
/// reach.
pub async fn create_cherry_pick_plan(
    reader: &CommitGraphReader<'_>,
    pr: &PullRequestRef,
    pr_commits: &[CommitRecord],
    progress: &dyn ProgressCallback,
) -> Result<CherryPickPlan> {
    let mode = classify_merge_mode(reader, pr, pr_commits)
        .await
        .map_err(|e| e.at_stage(CherryPickStage::ModeClassified))?;
    progress.on_stage(CherryPickStage::ModeClassified).await;

    let (plan, stage) = match mode {
        MergeMode::Merge => {
            let index = locate_patch_tree(reader, pr, pr_commits)
                .await
                .map_err(|e| e.at_stage(CherryPickStage::PatchTreeFound))?;
            (
                CherryPickPlan::merge(&pr.merge_commit_sha, index),
                CherryPickStage::PatchTreeFound,
            )
        }
        MergeMode::Rebase => {
            let plan = reconstruct_rebase_commits(reader, pr, pr_commits)
                .await
                .and_then(CherryPickPlan::rebase)
                .map_err(|e| e.at_stage(CherryPickStage::CommitsReconstructed))?;
            (plan, CherryPickStage::CommitsReconstructed)
        }
        MergeMode::Squash => (
            CherryPickPlan::squash(&pr.merge_commit_sha),
            CherryPickStage::Ready,
        ),
    };
    progress.on_stage(stage).await;

    Ok(plan)
}
