//! Publishing the feature branch as a backport PR

use super::branch::FeatureBranch;
use crate::config::CherryPickOptions;
use crate::error::{Error, Result};
use crate::git::GitBackend;
use crate::platform::PlatformService;
use crate::types::{PullRequest, PullRequestRef};
use tracing::debug;

/// Push the feature branch to `remote`
pub async fn push_feature_branch(
    git: &dyn GitBackend,
    remote: &str,
    branch: &FeatureBranch,
) -> Result<()> {
    debug!(remote, branch = %branch.name, "pushing feature branch");
    let args = ["push", remote, branch.name.as_str()];
    git.run(&args)
        .await
        .and_then(|out| out.into_result(&args))
        .map_err(|e| Error::Publish(format!("push {} to {remote}: {e}", branch.name)))?;
    Ok(())
}

/// Title of the backport PR
pub fn backport_title(original: &PullRequestRef, base_branch: &str) -> String {
    format!(
        "Automated cherry pick of #{} on {base_branch}",
        original.number
    )
}

/// Markdown blockquote line, without trailing spaces on blank lines
fn quote_line(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        ">\n".to_string()
    } else {
        format!("> {line}\n")
    }
}

/// Body of the backport PR: origin, quoted title and description, author mention
pub fn backport_body(original: &PullRequestRef, base_branch: &str) -> String {
    let mut body = format!(
        "This is an automated cherry-pick of #{} ({}) onto `{base_branch}`.\n\n",
        original.number, original.head_ref
    );
    body.push_str(&format!("> {}\n", original.title));
    if let Some(text) = original.body.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        body.push_str(">\n");
        for line in text.lines() {
            body.push_str(&quote_line(line));
        }
    }
    body.push('\n');
    if !original.author.is_empty() {
        body.push_str(&format!("/cc @{}\n\n", original.author));
    }
    body.push_str("```release-note\nNONE\n```\n");
    body
}

fn into_publish(err: Error) -> Error {
    match err {
        Error::Publish(_) => err,
        other => Error::Publish(other.to_string()),
    }
}

/// Head reference for the new PR: `fork-owner:branch` for forks
fn head_ref(branch: &FeatureBranch, fork_owner: Option<&str>) -> String {
    match fork_owner {
        Some(owner) => format!("{owner}:{}", branch.name),
        None => branch.name.clone(),
    }
}

/// Open the backport PR against `base_branch`
pub async fn create_pull_request(
    platform: &dyn PlatformService,
    original: &PullRequestRef,
    branch: &FeatureBranch,
    base_branch: &str,
    options: &CherryPickOptions,
) -> Result<PullRequest> {
    let head = head_ref(branch, options.fork_owner.as_deref());
    let title = backport_title(original, base_branch);
    let body = backport_body(original, base_branch);

    let pr = platform
        .create_pr_with_options(
            &head,
            base_branch,
            &title,
            Some(&body),
            options.maintainer_can_modify,
        )
        .await
        .map_err(into_publish)?;

    if options.request_author_review && !original.author.is_empty() {
        platform
            .request_reviewers(pr.number, std::slice::from_ref(&original.author))
            .await
            .map_err(into_publish)?;
    }

    debug!(pr_number = pr.number, head, "opened backport PR");
    Ok(pr)
}
