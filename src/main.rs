//! volume-bridge demo binary
//!
//! Runs the volume event bridge against the simulated backend and exposes a
//! REPL for injecting button presses, toggling swallow mode, and inspecting
//! bridge state. Real platform shims plug in through the same
//! `VolumeBackend` seam.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volume_bridge::backend::SimulatedBackend;
use volume_bridge::bridge::BridgeActor;
use volume_bridge::config::{load_config, BridgeConfig};

mod cli;

/// Volume Bridge - detect hardware volume-button presses as directional events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply if omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Start with swallow mode enabled (presses leave system volume unchanged)
    #[arg(long)]
    swallow: bool,

    /// Do not start listening automatically
    #[arg(long)]
    no_autostart: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting volume bridge...");

    let mut config = match &args.config {
        Some(path) => {
            info!("Configuration file: {}", path);
            load_config(path).await?
        }
        None => BridgeConfig::default(),
    };
    if args.swallow {
        config.swallow_changes = true;
    }

    let backend = Arc::new(SimulatedBackend::new(config.baseline_volume));
    let bridge = BridgeActor::spawn(backend.clone(), config);

    bridge.set_consumer(cli::print_event);

    if !args.no_autostart {
        bridge.start();
    }

    cli::run_repl(bridge, backend).await?;

    info!("Goodbye");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
