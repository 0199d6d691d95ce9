//! The cherry-pick orchestrator

use super::branch::{FeatureBranch, create_branch};
use super::execute::execute_plan;
use super::graph::CommitGraphReader;
use super::plan::{CherryPickPlan, create_cherry_pick_plan};
use super::publish::{create_pull_request, push_feature_branch};
use super::ProgressCallback;
use crate::config::CherryPickOptions;
use crate::error::{Error, Result};
use crate::git::GitBackend;
use crate::platform::PlatformService;
use crate::types::{CherryPickStage, PullRequest, PullRequestRef};
use tracing::{info, warn};

/// Result of a successful cherry-pick attempt
#[derive(Debug, Clone)]
pub struct CherryPickOutcome {
    /// The PR that was backported
    pub original: PullRequestRef,
    /// What was replayed
    pub plan: CherryPickPlan,
    /// Branch holding the replayed commits
    pub branch: FeatureBranch,
    /// The backport PR
    pub pull_request: PullRequest,
}

/// Sequences one cherry-pick attempt:
/// read commits, classify, plan, branch, cherry-pick, push, publish.
///
/// Every stage failure is wrapped with the stage and returned immediately.
/// Nothing is rolled back: a feature branch created before a later failure is
/// left in the working copy. A failed attempt cannot be resumed; run a new
/// one, which uses a new branch.
pub struct CherryPicker<'a> {
    platform: &'a dyn PlatformService,
    git: &'a dyn GitBackend,
    options: &'a CherryPickOptions,
}

impl<'a> CherryPicker<'a> {
    /// Create an orchestrator over the given collaborators
    pub const fn new(
        platform: &'a dyn PlatformService,
        git: &'a dyn GitBackend,
        options: &'a CherryPickOptions,
    ) -> Self {
        Self {
            platform,
            git,
            options,
        }
    }

    async fn advance(&self, progress: &dyn ProgressCallback, pr_number: u64, stage: CherryPickStage) {
        info!(pr_number, %stage, "cherry-pick stage reached");
        progress.on_stage(stage).await;
    }

    /// Read a merged PR and plan its backport without touching the working copy
    pub async fn plan(
        &self,
        pr_number: u64,
        progress: &dyn ProgressCallback,
    ) -> Result<(PullRequestRef, CherryPickPlan)> {
        self.advance(progress, pr_number, CherryPickStage::Initialized)
            .await;

        let reader = CommitGraphReader::new(self.platform);
        let pr = reader
            .pull_request(pr_number)
            .await
            .map_err(|e| e.at_stage(CherryPickStage::CommitsRead))?;
        let pr_commits = reader
            .pr_commits(&pr)
            .await
            .map_err(|e| e.at_stage(CherryPickStage::CommitsRead))?;
        self.advance(progress, pr_number, CherryPickStage::CommitsRead)
            .await;

        let plan = create_cherry_pick_plan(&reader, &pr, &pr_commits, progress).await?;
        info!(pr_number, mode = %plan.mode(), commits = plan.commit_shas().len(), "planned cherry-pick");
        Ok((pr, plan))
    }

    /// Backport a merged PR onto `target_branch` and open the backport PR
    pub async fn cherry_pick(
        &self,
        pr_number: u64,
        target_branch: &str,
        progress: &dyn ProgressCallback,
    ) -> Result<CherryPickOutcome> {
        if target_branch.trim().is_empty() {
            return Err(Error::Validation("target branch is empty".to_string())
                .at_stage(CherryPickStage::Initialized));
        }

        let (original, plan) = self.plan(pr_number, progress).await?;

        let branch = create_branch(self.git, target_branch, original.number)
            .await
            .map_err(|e| e.at_stage(CherryPickStage::BranchCreated))?;
        self.advance(progress, pr_number, CherryPickStage::BranchCreated)
            .await;

        let left_behind = |e: Error, stage: CherryPickStage| {
            warn!(
                pr_number,
                branch = %branch.name,
                %stage,
                "cherry-pick failed; leaving feature branch for inspection"
            );
            e.at_stage(stage)
        };

        execute_plan(self.git, &branch, &plan)
            .await
            .map_err(|e| left_behind(e, CherryPickStage::Cherrypicked))?;
        self.advance(progress, pr_number, CherryPickStage::Cherrypicked)
            .await;

        push_feature_branch(self.git, &self.options.remote, &branch)
            .await
            .map_err(|e| left_behind(e, CherryPickStage::Pushed))?;
        self.advance(progress, pr_number, CherryPickStage::Pushed)
            .await;

        let pull_request =
            create_pull_request(self.platform, &original, &branch, target_branch, self.options)
                .await
                .map_err(|e| left_behind(e, CherryPickStage::Published))?;
        self.advance(progress, pr_number, CherryPickStage::Published)
            .await;

        progress
            .on_message(&format!(
                "Opened #{} ({})",
                pull_request.number, pull_request.html_url
            ))
            .await;

        Ok(CherryPickOutcome {
            original,
            plan,
            branch,
            pull_request,
        })
    }
}
