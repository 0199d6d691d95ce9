//! Feature branch creation

use crate::error::{Error, Result};
use crate::git::{GitBackend, branch_exists, run_git};
use chrono::Utc;
use tracing::debug;

/// Prefix shared by every backport branch
const BRANCH_PREFIX: &str = "automated-cherry-pick-of";

/// The local branch holding one attempt's cherry-picked commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBranch {
    /// Branch name, fixed for the whole attempt
    pub name: String,
    /// Branch it was created from
    pub source_branch: String,
}

/// Name of the feature branch for a PR at a given unix timestamp
pub fn feature_branch_name(pr_number: u64, unix_seconds: i64) -> String {
    format!("{BRANCH_PREFIX}-{pr_number}-{unix_seconds}")
}

/// Create and check out a new feature branch off `source_branch`.
///
/// The source branch must already exist locally. Each call produces a new
/// branch; branches from earlier attempts are left alone.
pub async fn create_branch(
    git: &dyn GitBackend,
    source_branch: &str,
    pr_number: u64,
) -> Result<FeatureBranch> {
    if !branch_exists(git, source_branch).await? {
        return Err(Error::Validation(format!(
            "branch '{source_branch}' does not exist locally in {}",
            git.workdir().display()
        )));
    }

    let name = feature_branch_name(pr_number, Utc::now().timestamp());
    run_git(git, &["checkout", source_branch]).await?;
    run_git(git, &["branch", &name]).await?;
    run_git(git, &["checkout", &name]).await?;

    debug!(branch = %name, source = source_branch, "created feature branch");
    Ok(FeatureBranch {
        name,
        source_branch: source_branch.to_string(),
    })
}
