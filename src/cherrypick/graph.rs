//! Commit metadata reads with a per-invocation cache

use crate::error::{Error, Result};
use crate::platform::{MAX_PER_PAGE, PlatformService};
use crate::types::{CommitRecord, PullRequestRef};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Reads PRs and commits from the platform.
///
/// Commits fetched by SHA are cached for the lifetime of the reader, which
/// should be one cherry-pick attempt.
pub struct CommitGraphReader<'a> {
    platform: &'a dyn PlatformService,
    cache: Mutex<HashMap<String, CommitRecord>>,
}

impl<'a> CommitGraphReader<'a> {
    /// Create a reader over a platform service
    pub fn new(platform: &'a dyn PlatformService) -> Self {
        Self {
            platform,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the merged PR being backported
    pub async fn pull_request(&self, pr_number: u64) -> Result<PullRequestRef> {
        self.platform.get_pull_request(pr_number).await
    }

    /// Get every commit of a PR, oldest first.
    ///
    /// Pages through the listing until a short page comes back. An empty
    /// list is a validation error.
    pub async fn pr_commits(&self, pr: &PullRequestRef) -> Result<Vec<CommitRecord>> {
        let mut commits = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .platform
                .list_pr_commits(pr.number, page, MAX_PER_PAGE)
                .await?;
            let fetched = batch.len();
            commits.extend(batch);
            if fetched < usize::from(MAX_PER_PAGE) {
                break;
            }
            page += 1;
        }

        if commits.is_empty() {
            return Err(Error::Validation(format!(
                "{}/{}#{} has no commits",
                pr.owner, pr.repo, pr.number
            )));
        }

        debug!(pr_number = pr.number, count = commits.len(), "read PR commits");
        Ok(commits)
    }

    /// Get a commit by SHA, from cache when possible
    pub async fn commit(&self, sha: &str) -> Result<CommitRecord> {
        if let Some(hit) = self.cached(sha) {
            return Ok(hit);
        }

        let commit = self.platform.get_commit(sha).await?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(sha.to_string(), commit.clone());
        }
        Ok(commit)
    }

    fn cached(&self, sha: &str) -> Option<CommitRecord> {
        self.cache.lock().ok()?.get(sha).cloned()
    }
}
