//! Pick command - backport a merged PR onto a branch

use crate::cli::CliProgress;
use crate::cli::context::{CommandContext, Overrides};
use crate::cli::plan::print_plan;
use crate::cli::style::{CHECK, Stylize, pr_link};
use anstream::println;
use dialoguer::Confirm;
use pr_backport::cherrypick::CherryPicker;
use pr_backport::error::{Error, Result};
use std::path::Path;

/// Options for the pick command
#[derive(Debug, Clone, Default)]
pub struct PickOptions {
    /// Branch to backport onto
    pub onto: String,
    /// Fork owner override
    pub fork_owner: Option<String>,
    /// Only show the plan
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the pick command
pub async fn run_pick(
    path: &Path,
    remote: Option<&str>,
    pr_number: u64,
    options: PickOptions,
) -> Result<()> {
    let ctx = CommandContext::new(
        path,
        Overrides {
            remote,
            fork_owner: options.fork_owner.as_deref(),
        },
    )
    .await?;
    let picker = CherryPicker::new(ctx.platform.as_ref(), &ctx.git, &ctx.options);

    if options.dry_run || options.confirm {
        let progress = CliProgress::new();
        let result = picker.plan(pr_number, &progress).await;
        progress.finish();
        let (pr, plan) = result?;
        print_plan(&pr, &plan);

        if options.dry_run {
            println!("{}", "Dry run complete".muted());
            return Ok(());
        }
        if !Confirm::new()
            .with_prompt(format!("Cherry-pick onto {}?", options.onto))
            .default(true)
            .interact()
            .map_err(|e| Error::Validation(format!("failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let progress = CliProgress::new();
    let result = picker
        .cherry_pick(pr_number, &options.onto, &progress)
        .await;
    progress.finish();
    let outcome = result?;

    println!(
        "{} {} of #{} onto {}: {}",
        format!("{CHECK} Cherry-picked").success(),
        outcome.plan.mode().accent(),
        outcome.original.number,
        options.onto.emphasis(),
        pr_link(outcome.pull_request.number, &outcome.pull_request.html_url)
    );
    println!("  branch {}", outcome.branch.name.muted());
    Ok(())
}
