//! modstats - SpaceWarp download statistics reporting, main entry point

use anyhow::Result;
use clap::Parser;
use modstats::pipeline;
use modstats_common::{init_logging, LoggingConfig};
use modstats_config::SettingsLoader;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Aggregate SpaceWarp download statistics and render summary charts", long_about = None)]
struct Args {
    /// GitHub access token used for the release-listing API
    access_token: String,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter, overriding the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings before logging so the configured level applies
    let settings = match &args.config {
        Some(path) => SettingsLoader::load_from_file(path)?,
        None => SettingsLoader::load()?,
    };

    let logging = LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| settings.logging.level.clone()),
        file: settings.logging.file.clone(),
        ansi: settings.logging.colored,
    };
    init_logging(&logging).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("Starting modstats");

    if args.access_token.trim().is_empty() {
        anyhow::bail!("A GitHub access token is required");
    }

    match pipeline::run(&settings, &args.access_token).await {
        Ok(totals) => {
            info!(
                versions = totals.len(),
                total = totals.grand_total(),
                "Report complete"
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {e}");
            Err(e.into())
        }
    }
}
