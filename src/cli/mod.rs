//! Command-line interface for backport

pub mod auth;
pub mod context;
pub mod pick;
pub mod plan;
pub mod style;

use anstream::println;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use pr_backport::cherrypick::ProgressCallback;
use pr_backport::types::CherryPickStage;
use std::path::PathBuf;
use std::time::Duration;
use style::{Stylize, arrow, spinner_style};

/// Backport merged pull requests onto release branches
#[derive(Parser, Debug)]
#[command(name = "backport")]
#[command(version)]
#[command(about = "Backport merged pull requests onto release branches by cherry-picking")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the local repository
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

    /// Remote to read from and push to (default: origin)
    #[arg(long, global = true)]
    pub remote: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cherry-pick a merged PR onto a branch and open a backport PR
    Pick {
        /// Number of the merged PR
        pr: u64,

        /// Branch to backport onto (must exist locally)
        #[arg(long)]
        onto: String,

        /// Push to this fork owner's repository and open the PR from there
        #[arg(long)]
        fork_owner: Option<String>,

        /// Show the plan without touching the working copy
        #[arg(long)]
        dry_run: bool,

        /// Preview the plan and prompt before executing
        #[arg(long)]
        confirm: bool,
    },

    /// Show how a merged PR would be cherry-picked
    Plan {
        /// Number of the merged PR
        pr: u64,
    },

    /// Check GitHub authentication for the repository
    Auth,
}

/// Progress reporting for the terminal: a spinner per stage
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create a progress reporter with a ticking spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Stop the spinner and clear its line
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage(&self, stage: CherryPickStage) {
        let next = match stage {
            CherryPickStage::Initialized => "Reading pull request...",
            CherryPickStage::CommitsRead => "Classifying merge mode...",
            CherryPickStage::ModeClassified => "Planning commits...",
            CherryPickStage::PatchTreeFound
            | CherryPickStage::CommitsReconstructed
            | CherryPickStage::Ready => "Creating branch...",
            CherryPickStage::BranchCreated => "Cherry-picking...",
            CherryPickStage::Cherrypicked => "Pushing...",
            CherryPickStage::Pushed => "Opening pull request...",
            CherryPickStage::Published => "Done",
        };
        self.spinner.set_message(next.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.spinner
            .suspend(|| println!("  {} {}", arrow(), message.muted()));
    }
}
