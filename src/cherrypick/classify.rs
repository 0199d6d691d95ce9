//! Merge mode classification and mainline parent lookup

use super::graph::CommitGraphReader;
use crate::error::{Error, Result};
use crate::types::{CommitRecord, MergeMode, PullRequestRef};
use tracing::debug;

fn last_commit<'c>(pr: &PullRequestRef, pr_commits: &'c [CommitRecord]) -> Result<&'c CommitRecord> {
    pr_commits
        .last()
        .ok_or_else(|| Error::Validation(format!("PR #{} has no commits", pr.number)))
}

/// Decide how a merged PR was integrated into its base branch.
///
/// - merge commit with more than one parent: `Merge`
/// - single-commit PR: `Squash` (a lone commit cannot be told apart from a
///   rebase by tree comparison, so squash is assumed)
/// - merge commit tree equal to the last PR commit's tree: `Rebase`
/// - otherwise: `Squash`
pub async fn classify_merge_mode(
    reader: &CommitGraphReader<'_>,
    pr: &PullRequestRef,
    pr_commits: &[CommitRecord],
) -> Result<MergeMode> {
    let last = last_commit(pr, pr_commits)?;
    let merge_commit = reader.commit(&pr.merge_commit_sha).await?;

    let mode = if merge_commit.is_merge() {
        MergeMode::Merge
    } else if pr_commits.len() == 1 {
        MergeMode::Squash
    } else if merge_commit.tree_sha == last.tree_sha {
        MergeMode::Rebase
    } else {
        MergeMode::Squash
    };

    debug!(
        pr_number = pr.number,
        %mode,
        parents = merge_commit.parent_shas.len(),
        commits = pr_commits.len(),
        "classified merge mode"
    );
    Ok(mode)
}

/// Find the zero-based index of the merge commit parent whose tree equals
/// the last PR commit's tree.
///
/// Parents are searched in order and the first match wins. No match is an
/// `AmbiguousMergeMode` error; there is no fallback index.
pub async fn locate_patch_tree(
    reader: &CommitGraphReader<'_>,
    pr: &PullRequestRef,
    pr_commits: &[CommitRecord],
) -> Result<usize> {
    let pr_tree_sha = &last_commit(pr, pr_commits)?.tree_sha;
    let merge_commit = reader.commit(&pr.merge_commit_sha).await?;

    for (index, parent_sha) in merge_commit.parent_shas.iter().enumerate() {
        let parent = reader.commit(parent_sha).await?;
        if &parent.tree_sha == pr_tree_sha {
            debug!(pr_number = pr.number, index, parent = %parent_sha, "found patch tree");
            return Ok(index);
        }
    }

    Err(Error::AmbiguousMergeMode {
        merge_commit: merge_commit.sha,
        parents_searched: merge_commit.parent_shas.len(),
    })
}
