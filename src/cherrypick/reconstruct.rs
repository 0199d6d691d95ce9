//! Recovery of rebased commits on the base branch

use super::graph::CommitGraphReader;
use crate::error::{Error, Result};
use crate::types::{CommitRecord, PullRequestRef};
use tracing::debug;

/// Recover the base-branch SHAs a rebase-merged PR produced, oldest first.
///
/// Walks first parents back from the merge commit, pairing each branch commit
/// with the PR commit at the same distance from the end. Every pair must carry
/// the same tree; the first mismatch fails the walk.
pub async fn reconstruct_rebase_commits(
    reader: &CommitGraphReader<'_>,
    pr: &PullRequestRef,
    pr_commits: &[CommitRecord],
) -> Result<Vec<String>> {
    if pr_commits.is_empty() {
        return Err(Error::Validation(format!("PR #{} has no commits", pr.number)));
    }

    let mut shas = Vec::with_capacity(pr_commits.len());
    let mut branch_commit = reader.commit(&pr.merge_commit_sha).await?;

    for (index, pr_commit) in pr_commits.iter().enumerate().rev() {
        if pr_commit.tree_sha != branch_commit.tree_sha {
            return Err(Error::ReconstructionMismatch {
                index,
                pr_tree: pr_commit.tree_sha.clone(),
                branch_commit: branch_commit.sha,
                branch_tree: branch_commit.tree_sha,
            });
        }
        shas.push(branch_commit.sha.clone());

        if index == 0 {
            break;
        }
        let parent = branch_commit.first_parent().ok_or_else(|| {
            Error::api(
                "get_commit",
                format!("{}/{}@{}", pr.owner, pr.repo, branch_commit.sha),
                "commit has no parent",
            )
        })?;
        branch_commit = reader.commit(parent).await?;
    }

    shas.reverse();
    debug!(pr_number = pr.number, count = shas.len(), "reconstructed rebased commits");
    Ok(shas)
}
