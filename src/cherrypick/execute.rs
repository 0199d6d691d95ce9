//! Cherry-pick execution - effectful operations
//!
//! Applies a `CherryPickPlan` to the checked-out feature branch. Conflicts are
//! detected from `git status --porcelain` and reported, never resolved or
//! aborted; the working copy is left as git left it.

use super::branch::FeatureBranch;
use super::plan::CherryPickPlan;
use crate::error::{Error, Result};
use crate::git::{GitBackend, run_git};
use crate::types::MergeMode;
use tracing::debug;

/// Porcelain status lines that mark unmerged paths (lines starting with `U`)
pub fn unmerged_paths(status: &str) -> Vec<&str> {
    status.lines().filter(|line| line.starts_with('U')).collect()
}

/// Run one cherry-pick invocation and classify its outcome
async fn cherry_pick(git: &dyn GitBackend, branch: &FeatureBranch, args: &[&str]) -> Result<()> {
    run_git(git, &["checkout", &branch.name]).await?;

    debug!(branch = %branch.name, args = %args.join(" "), "cherry-picking");
    let picked = git.run(args).await?;

    let status = run_git(git, &["status", "--porcelain"]).await?;
    if !unmerged_paths(&status).is_empty() {
        debug!(branch = %branch.name, "cherry-pick left conflicts");
        return Err(Error::Conflict { status });
    }

    picked.into_result(args)?;
    Ok(())
}

/// Cherry-pick `shas` (oldest first) onto the feature branch in one invocation
pub async fn cherrypick_commits(
    git: &dyn GitBackend,
    branch: &FeatureBranch,
    shas: &[String],
) -> Result<()> {
    if shas.is_empty() {
        return Err(Error::Validation("no commits to cherry-pick".to_string()));
    }

    let mut args = vec!["cherry-pick"];
    args.extend(shas.iter().map(String::as_str));
    cherry_pick(git, branch, &args).await
}

/// Cherry-pick a merge commit against a mainline parent.
///
/// `mainline` is passed to `git cherry-pick -m` unchanged.
pub async fn cherrypick_merge_commit(
    git: &dyn GitBackend,
    branch: &FeatureBranch,
    shas: &[String],
    mainline: usize,
) -> Result<()> {
    let [merge_commit] = shas else {
        return Err(Error::Validation(format!(
            "merge cherry-pick needs exactly one commit, got {}",
            shas.len()
        )));
    };

    let mainline = mainline.to_string();
    cherry_pick(
        git,
        branch,
        &["cherry-pick", "-m", &mainline, merge_commit.as_str()],
    )
    .await
}

/// Apply a plan to the feature branch
pub async fn execute_plan(
    git: &dyn GitBackend,
    branch: &FeatureBranch,
    plan: &CherryPickPlan,
) -> Result<()> {
    match (plan.mode(), plan.mainline_parent()) {
        (MergeMode::Merge, Some(mainline)) => {
            cherrypick_merge_commit(git, branch, plan.commit_shas(), mainline).await
        }
        (MergeMode::Merge, None) => Err(Error::Validation(
            "merge plan has no mainline parent".to_string(),
        )),
        (MergeMode::Squash | MergeMode::Rebase, _) => {
            cherrypick_commits(git, branch, plan.commit_shas()).await
        }
    }
}
