//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CommitRecord, PlatformConfig, PullRequest, PullRequestRef};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

// REST response types. Only the fields the engine reads are modelled.

#[derive(Deserialize)]
struct ApiCommit {
    #[serde(default)]
    sha: String,
    commit: Option<ApiCommitDetail>,
    #[serde(default)]
    parents: Vec<ApiSha>,
}

#[derive(Deserialize)]
struct ApiCommitDetail {
    tree: ApiSha,
}

#[derive(Deserialize)]
struct ApiSha {
    sha: String,
}

#[derive(Deserialize)]
struct ApiUser {
    login: String,
}

#[derive(Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct ApiPullRequest {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    user: Option<ApiUser>,
    head: ApiRef,
    base: ApiRef,
    merge_commit_sha: Option<String>,
    merged_at: Option<String>,
}

impl ApiCommit {
    fn into_record(self, operation: &'static str, target: &str) -> Result<CommitRecord> {
        let tree_sha = self
            .commit
            .map(|c| c.tree.sha)
            .filter(|sha| !sha.is_empty());
        match tree_sha {
            Some(tree_sha) if !self.sha.is_empty() => Ok(CommitRecord {
                sha: self.sha,
                tree_sha,
                parent_shas: self.parents.into_iter().map(|p| p.sha).collect(),
            }),
            _ => Err(Error::api(operation, target, "empty commit payload")),
        }
    }
}

/// Render an octocrab error
fn describe(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
            format!("not found: {}", source.message)
        }
        octocrab::Error::GitHub { source, .. } => {
            format!("{} ({})", source.message, source.status_code)
        }
        other => other.to_string(),
    }
}

/// GitHub service: octocrab for PR mutations, raw REST for commit reads
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API root for raw requests, with scheme
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::build(token, api_base, host.is_some(), PlatformConfig { owner, repo, host })
    }

    /// Create a service against an explicit API root (e.g. a local test server)
    pub fn with_base_uri(token: &str, owner: String, repo: String, base_uri: &str) -> Result<Self> {
        Self::build(
            token,
            base_uri.trim_end_matches('/').to_string(),
            true,
            PlatformConfig {
                owner,
                repo,
                host: None,
            },
        )
    }

    fn build(
        token: &str,
        api_base: String,
        custom_base: bool,
        config: PlatformConfig,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if custom_base {
            builder = builder
                .base_uri(&api_base)
                .map_err(|e| Error::api("configure client", &api_base, e))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::api("configure client", "github", e))?;

        let http_client = Client::builder()
            .user_agent("pr-backport")
            .build()
            .map_err(|e| Error::api("configure client", "github", e))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_slug(&self) -> String {
        format!("{}/{}", self.config.owner, self.config.repo)
    }

    /// GET a repository-relative REST path and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        target: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!(
            "{}/repos/{}/{}{path}",
            self.api_base, self.config.owner, self.config.repo
        );

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::api(operation, target, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::api(operation, target, "not found"));
        }
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(%status, operation, error = %e, "failed to read error body");
                    format!("<unreadable body: {e}>")
                }
            };
            debug!(%status, operation, "GitHub request failed");
            return Err(Error::api(
                operation,
                target,
                format!("HTTP {status}: {}", body.trim()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| Error::api(operation, target, format!("unexpected payload: {e}")))
    }

    /// Check that the token can read the repository
    pub async fn check_access(&self) -> Result<()> {
        let _: serde_json::Value = self
            .get_json("get_repository", &self.repo_slug(), "", &[])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequestRef> {
        debug!(pr_number, "getting pull request");
        let target = format!("{}#{pr_number}", self.repo_slug());

        let pr: ApiPullRequest = self
            .get_json(
                "get_pull_request",
                &target,
                &format!("/pulls/{pr_number}"),
                &[],
            )
            .await?;

        if pr.merged_at.is_none() {
            return Err(Error::Validation(format!("{target} is not merged")));
        }
        let merge_commit_sha = pr
            .merge_commit_sha
            .filter(|sha| !sha.is_empty())
            .ok_or_else(|| Error::Validation(format!("{target} has no merge commit SHA")))?;

        debug!(pr_number, merge_commit_sha, "got pull request");
        Ok(PullRequestRef {
            owner: self.config.owner.clone(),
            repo: self.config.repo.clone(),
            number: pr.number,
            author: pr.user.map(|u| u.login).unwrap_or_default(),
            title: pr.title.unwrap_or_default(),
            body: pr.body,
            head_ref: pr.head.ref_field,
            base_ref: pr.base.ref_field,
            merge_commit_sha,
        })
    }

    async fn get_commit(&self, sha: &str) -> Result<CommitRecord> {
        debug!(sha, "getting commit");
        let target = format!("{}@{sha}", self.repo_slug());

        let commit: ApiCommit = self
            .get_json("get_commit", &target, &format!("/commits/{sha}"), &[])
            .await?;

        commit.into_record("get_commit", &target)
    }

    async fn list_pr_commits(
        &self,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<CommitRecord>> {
        debug!(pr_number, page, per_page, "listing PR commits");
        let target = format!("{}#{pr_number}", self.repo_slug());

        let commits: Vec<ApiCommit> = self
            .get_json(
                "list_pr_commits",
                &target,
                &format!("/pulls/{pr_number}/commits"),
                &[("per_page", per_page.to_string()), ("page", page.to_string())],
            )
            .await?;

        let result = commits
            .into_iter()
            .map(|c| c.into_record("list_pr_commits", &target))
            .collect::<Result<Vec<_>>>()?;
        debug!(pr_number, page, count = result.len(), "listed PR commits");
        Ok(result)
    }

    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        maintainer_can_modify: bool,
    ) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls
            .create(title, head, base)
            .maintainer_can_modify(maintainer_can_modify);

        if let Some(body_text) = body {
            builder = builder.body(body_text);
        }

        let pr = builder
            .send()
            .await
            .map_err(|e| Error::Publish(format!("create PR {head} -> {base}: {}", describe(&e))))?;

        let result = PullRequest {
            number: pr.number,
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            base_ref: pr.base.ref_field.clone(),
            head_ref: pr.head.ref_field.clone(),
            title: pr.title.as_deref().unwrap_or_default().to_string(),
        };
        debug!(pr_number = result.number, "created PR");
        Ok(result)
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        debug!(pr_number, ?reviewers, "requesting reviewers");
        let route = format!(
            "/repos/{}/{}/pulls/{pr_number}/requested_reviewers",
            self.config.owner, self.config.repo
        );

        let _: serde_json::Value = self
            .client
            .post(route, Some(&serde_json::json!({ "reviewers": reviewers })))
            .await
            .map_err(|e| {
                Error::Publish(format!(
                    "request reviewers on #{pr_number}: {}",
                    describe(&e)
                ))
            })?;

        debug!(pr_number, "requested reviewers");
        Ok(())
    }
}
