//! backport - cherry-pick merged pull requests onto release branches

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> pr_backport::Result<()> {
    let remote = cli.remote.as_deref();
    match cli.command {
        Commands::Pick {
            pr,
            onto,
            fork_owner,
            dry_run,
            confirm,
        } => {
            cli::pick::run_pick(
                &cli.path,
                remote,
                pr,
                cli::pick::PickOptions {
                    onto,
                    fork_owner,
                    dry_run,
                    confirm,
                },
            )
            .await
        }
        Commands::Plan { pr } => cli::plan::run_plan(&cli.path, remote, pr).await,
        Commands::Auth => cli::auth::run_auth(&cli.path, remote).await,
    }
}
