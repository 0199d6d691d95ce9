//! Platform services for the source-hosting API
//!
//! Provides the commit and pull request operations the cherry-pick engine needs.

mod detection;
mod factory;
mod github;

pub use detection::parse_repo_info;
pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CommitRecord, PullRequest, PullRequestRef};
use async_trait::async_trait;

/// Largest page size the API accepts for PR commit listings
pub const MAX_PER_PAGE: u8 = 100;

/// Platform service trait for commit and PR operations
///
/// Implementations talk to one repository, named by its `PlatformConfig`.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get a pull request by number.
    ///
    /// Fails with a validation error if the PR is not merged.
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestRef>;

    /// Get a commit by SHA. Unknown SHAs are an `Api` error.
    async fn get_commit(&self, sha: &str) -> Result<CommitRecord>;

    /// List one page of a PR's commits, oldest first. `page` is 1-based.
    async fn list_pr_commits(
        &self,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<CommitRecord>>;

    /// Create a new PR with explicit body and maintainer-edit options.
    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        maintainer_can_modify: bool,
    ) -> Result<PullRequest>;

    /// Request reviews from the given users on a PR
    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()>;
}
