//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use pr_backport::error::{Error, Result};
use pr_backport::platform::PlatformService;
use pr_backport::types::{CommitRecord, PlatformConfig, PullRequest, PullRequestRef};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Call record for `create_pr_with_options`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: Option<String>,
    pub maintainer_can_modify: bool,
}

/// Call record for `list_pr_commits`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCommitsCall {
    pub pr_number: u64,
    pub page: u32,
    pub per_page: u8,
}

/// Call record for `request_reviewers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReviewersCall {
    pub pr_number: u64,
    pub reviewers: Vec<String>,
}

/// Hand-written mock of `PlatformService`.
///
/// Features:
/// - Scripted PRs, PR commit lists (paged like the real API) and commits by SHA
/// - Auto-incrementing numbers for created PRs
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - A hang switch for cancellation tests
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    pull_requests: Mutex<HashMap<u64, PullRequestRef>>,
    pr_commits: Mutex<HashMap<u64, Vec<CommitRecord>>>,
    commits: Mutex<HashMap<String, CommitRecord>>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    get_commit_calls: Mutex<Vec<String>>,
    list_commits_calls: Mutex<Vec<ListCommitsCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    request_reviewers_calls: Mutex<Vec<RequestReviewersCall>>,
    // Error injection
    error_on_get_commit: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_request_reviewers: Mutex<Option<String>>,
    hang_on_get_commit: AtomicBool,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(90_001),
            pull_requests: Mutex::new(HashMap::new()),
            pr_commits: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            get_commit_calls: Mutex::new(Vec::new()),
            list_commits_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            request_reviewers_calls: Mutex::new(Vec::new()),
            error_on_get_commit: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_request_reviewers: Mutex::new(None),
            hang_on_get_commit: AtomicBool::new(false),
        }
    }

    // === Scripting ===

    /// Register a merged PR together with its commits, oldest first
    pub fn add_pull_request(&self, pr: PullRequestRef, commits: Vec<CommitRecord>) {
        for commit in &commits {
            self.add_commit(commit.clone());
        }
        self.pr_commits.lock().unwrap().insert(pr.number, commits);
        self.pull_requests.lock().unwrap().insert(pr.number, pr);
    }

    /// Register a commit readable by SHA
    pub fn add_commit(&self, commit: CommitRecord) {
        self.commits
            .lock()
            .unwrap()
            .insert(commit.sha.clone(), commit);
    }

    // === Error injection methods ===

    /// Make `get_commit` return an error
    pub fn fail_get_commit(&self, msg: &str) {
        *self.error_on_get_commit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_with_options` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `request_reviewers` return an error
    pub fn fail_request_reviewers(&self, msg: &str) {
        *self.error_on_request_reviewers.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_commit` never complete
    pub fn hang_on_get_commit(&self) {
        self.hang_on_get_commit.store(true, Ordering::SeqCst);
    }

    // === Call inspection ===

    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn get_commit_calls(&self) -> Vec<String> {
        self.get_commit_calls.lock().unwrap().clone()
    }

    pub fn list_commits_calls(&self) -> Vec<ListCommitsCall> {
        self.list_commits_calls.lock().unwrap().clone()
    }

    pub fn create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    pub fn request_reviewers_calls(&self) -> Vec<RequestReviewersCall> {
        self.request_reviewers_calls.lock().unwrap().clone()
    }

    /// Assert a PR was opened from `head` into `base`
    pub fn assert_pr_created(&self, head: &str, base: &str) {
        let calls = self.create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected PR {head} -> {base}, got: {calls:?}"
        );
    }

    fn target(&self, suffix: &str) -> String {
        format!("{}/{}{suffix}", self.config.owner, self.config.repo)
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestRef> {
        self.get_pr_calls.lock().unwrap().push(pr_number);
        self.pull_requests
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| {
                Error::api(
                    "get_pull_request",
                    &self.target(&format!("#{pr_number}")),
                    "not found",
                )
            })
    }

    async fn get_commit(&self, sha: &str) -> Result<CommitRecord> {
        self.get_commit_calls.lock().unwrap().push(sha.to_string());

        if self.hang_on_get_commit.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(msg) = self.error_on_get_commit.lock().unwrap().as_ref() {
            return Err(Error::api("get_commit", &self.target(&format!("@{sha}")), msg));
        }

        self.commits
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .ok_or_else(|| Error::api("get_commit", &self.target(&format!("@{sha}")), "not found"))
    }

    async fn list_pr_commits(
        &self,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<CommitRecord>> {
        self.list_commits_calls.lock().unwrap().push(ListCommitsCall {
            pr_number,
            page,
            per_page,
        });

        let all = self
            .pr_commits
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default();
        let size = usize::from(per_page);
        let start = (page as usize).saturating_sub(1) * size;
        Ok(all.into_iter().skip(start).take(size).collect())
    }

    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        maintainer_can_modify: bool,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.map(ToString::to_string),
            maintainer_can_modify,
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Publish(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!(
                "https://github.com/{}/{}/pull/{number}",
                self.config.owner, self.config.repo
            ),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        self.request_reviewers_calls
            .lock()
            .unwrap()
            .push(RequestReviewersCall {
                pr_number,
                reviewers: reviewers.to_vec(),
            });

        if let Some(msg) = self.error_on_request_reviewers.lock().unwrap().as_ref() {
            return Err(Error::api(
                "request_reviewers",
                &self.target(&format!("#{pr_number}")),
                msg,
            ));
        }
        Ok(())
    }
}
