//! Main entry point for the tc2sc CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tc2sc::cli::commands::{self, Commands};

/// Convert Traditional-Chinese documentation pages to Simplified Chinese
#[derive(Parser, Debug)]
#[command(name = "tc2sc", version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults are compiled in)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(args.config)?;

    // Execute command
    match args.command {
        Some(Commands::Run {
            source_root,
            dest_root,
            scan,
            jobs,
        }) => {
            commands::handle_run(config, source_root, dest_root, scan, jobs).await?;
        }
        Some(Commands::File { input, output }) => {
            commands::handle_file(config, input, output).await?;
        }
        Some(Commands::Manifest { scan }) => {
            commands::handle_manifest(config, scan).await?;
        }
        None => {
            commands::handle_run(config, None, None, false, None).await?;
        }
    }

    Ok(())
}
