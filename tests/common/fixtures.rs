//! Recorded pull request histories for engine tests.
//!
//! Merge commit SHAs and the reconstructed rebase history are real; tree and
//! PR-branch commit SHAs are stand-ins that keep the recorded relationships.

#![allow(dead_code)]

use super::MockPlatformService;
use pr_backport::types::{CommitRecord, PlatformConfig, PullRequestRef};

pub const REBASE_PR: u64 = 18746;
pub const REBASE_MERGE_SHA: &str = "f68ba02e325002d7982936860f202b0524ee33bb";

/// Branch-side commits of PR #18746, oldest first
pub const REBASED_SHAS: [&str; 10] = [
    "ec9f8df72de730cb3b61c72678cdc050e93f925d",
    "ecd49172414b819632dc59adcd5bb6e480ee759e",
    "e6528fdcc4af928407a96e83004bc4d19f1bc797",
    "c3569b7c6b43a483a9910851afb36f44cbfdff28",
    "676cebd459c7e30e9444e692693f44b483b6dc26",
    "e5caaf33c0c4c500308fbc3f8e803481c7494bad",
    "2a18f5e31364faf48de617de2011c14124de90a1",
    "ca6e387e7eb7ee95d80c61540b5bf9840ee15255",
    "125767e905e06779c36dd97bc405fd73d1e18f5f",
    "f68ba02e325002d7982936860f202b0524ee33bb",
];

pub const MERGE_PR: u64 = 18759;
pub const MERGE_MERGE_SHA: &str = "bc19bb33b0590a7c5699d9a2618911adfd7c7d7c";

pub const SQUASH_PR: u64 = 18698;
pub const SQUASH_MERGE_SHA: &str = "e6f36f064959261f588c11f91aeb2fcb8164d70b";

pub const SINGLE_PR: u64 = 18733;
pub const SINGLE_MERGE_SHA: &str = "2a07d4641abfef5327249c380edb8b1292337319";

/// Create a GitHub config for testing
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "kubernetes".to_string(),
        repo: "minikube".to_string(),
        host: None,
    }
}

/// A merged PR with the given merge commit
pub fn merged_pr(number: u64, merge_commit_sha: &str) -> PullRequestRef {
    PullRequestRef {
        owner: "kubernetes".to_string(),
        repo: "minikube".to_string(),
        number,
        author: "medyagh".to_string(),
        title: format!("Change number {number}"),
        body: Some("Fixes a bug".to_string()),
        head_ref: format!("topic-{number}"),
        base_ref: "master".to_string(),
        merge_commit_sha: merge_commit_sha.to_string(),
    }
}

/// Build a commit record
pub fn commit(sha: &str, tree: &str, parents: &[&str]) -> CommitRecord {
    CommitRecord {
        sha: sha.to_string(),
        tree_sha: tree.to_string(),
        parent_shas: parents.iter().map(ToString::to_string).collect(),
    }
}

/// A linear run of PR-branch commits `prefix-1..=n`, each with tree `tree-prefix-i`
pub fn linear_pr_commits(prefix: &str, n: usize) -> Vec<CommitRecord> {
    (1..=n)
        .map(|i| {
            let parent = if i == 1 {
                format!("{prefix}-base")
            } else {
                format!("{prefix}-{}", i - 1)
            };
            commit(
                &format!("{prefix}-{i}"),
                &format!("tree-{prefix}-{i}"),
                &[&parent],
            )
        })
        .collect()
}

/// PR #18746: ten commits rebased onto master; the merge commit is the last one
pub fn setup_rebase_pr(mock: &MockPlatformService) -> PullRequestRef {
    let pr_commits = linear_pr_commits("pr18746", REBASED_SHAS.len());
    for (i, sha) in REBASED_SHAS.iter().enumerate() {
        let parent = if i == 0 {
            "master-before-18746"
        } else {
            REBASED_SHAS[i - 1]
        };
        mock.add_commit(commit(sha, &pr_commits[i].tree_sha, &[parent]));
    }

    let pr = merged_pr(REBASE_PR, REBASE_MERGE_SHA);
    mock.add_pull_request(pr.clone(), pr_commits);
    pr
}

/// PR #18759: two commits joined by a true merge; parent 1 carries the PR tree
pub fn setup_merge_pr(mock: &MockPlatformService) -> PullRequestRef {
    let pr_commits = linear_pr_commits("pr18759", 2);
    mock.add_commit(commit(
        MERGE_MERGE_SHA,
        "tree-merged-18759",
        &["master-before-18759", "pr18759-2"],
    ));
    mock.add_commit(commit(
        "master-before-18759",
        "tree-master-18759",
        &["master-older"],
    ));

    let pr = merged_pr(MERGE_PR, MERGE_MERGE_SHA);
    mock.add_pull_request(pr.clone(), pr_commits);
    pr
}

/// PR #18698: two commits squashed into one single-parent commit
pub fn setup_squash_pr(mock: &MockPlatformService) -> PullRequestRef {
    let pr_commits = linear_pr_commits("pr18698", 2);
    mock.add_commit(commit(
        SQUASH_MERGE_SHA,
        "tree-squashed-18698",
        &["master-before-18698"],
    ));

    let pr = merged_pr(SQUASH_PR, SQUASH_MERGE_SHA);
    mock.add_pull_request(pr.clone(), pr_commits);
    pr
}

/// PR #18733: a single commit, landed as one single-parent commit
pub fn setup_single_commit_pr(mock: &MockPlatformService) -> PullRequestRef {
    let pr_commits = linear_pr_commits("pr18733", 1);
    mock.add_commit(commit(
        SINGLE_MERGE_SHA,
        "tree-pr18733-1",
        &["master-before-18733"],
    ));

    let pr = merged_pr(SINGLE_PR, SINGLE_MERGE_SHA);
    mock.add_pull_request(pr.clone(), pr_commits);
    pr
}

/// A mock loaded with all four recorded PRs
pub fn recorded_history() -> MockPlatformService {
    let mock = MockPlatformService::with_config(github_config());
    setup_rebase_pr(&mock);
    setup_merge_pr(&mock);
    setup_squash_pr(&mock);
    setup_single_commit_pr(&mock);
    mock
}
