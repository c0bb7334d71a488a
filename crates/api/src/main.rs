//! convene - meeting scheduler client
//!
//! Main entry point for the command-line application.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use convene_app::utils::logging::init_logging;
use convene_app::{execute, AppContext, Cli};
use convene_infra::config;

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    init_logging(&config.logging);
    tracing::debug!(api = %config.api.base_url, "configuration loaded");

    let ctx = AppContext::new(config).context("failed to initialize application")?;
    ctx.initialize().await.context("failed to restore session")?;

    let outcome = execute(&ctx, cli.command).await?;
    println!("{}", outcome.render(cli.json)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
