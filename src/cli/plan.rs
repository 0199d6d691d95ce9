//! Plan command - show how a merged PR would be cherry-picked

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, Overrides};
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use pr_backport::cherrypick::{CherryPickPlan, CherryPicker};
use pr_backport::error::Result;
use pr_backport::types::PullRequestRef;
use std::path::Path;

/// Run the plan command
pub async fn run_plan(path: &Path, remote: Option<&str>, pr_number: u64) -> Result<()> {
    let ctx = CommandContext::new(
        path,
        Overrides {
            remote,
            ..Overrides::default()
        },
    )
    .await?;

    let picker = CherryPicker::new(ctx.platform.as_ref(), &ctx.git, &ctx.options);
    let progress = CliProgress::new();
    let result = picker.plan(pr_number, &progress).await;
    progress.finish();

    let (pr, plan) = result?;
    print_plan(&pr, &plan);
    Ok(())
}

/// Print a plan summary
pub fn print_plan(pr: &PullRequestRef, plan: &CherryPickPlan) {
    println!(
        "{} #{} {}",
        "Pull request".emphasis(),
        pr.number,
        pr.title.muted()
    );
    println!("  merged into {} as {}", pr.base_ref.accent(), pr.merge_commit_sha.muted());
    println!("  {} {}", "mode:".emphasis(), plan.mode().accent());
    if let Some(parent) = plan.mainline_parent() {
        println!("  {} {}", "mainline:".emphasis(), parent.accent());
    }
    println!("  {}:", "commits".emphasis());
    for sha in plan.commit_shas() {
        println!("    {} {}", arrow(), sha);
    }
}
