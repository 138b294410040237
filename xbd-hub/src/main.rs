//! xbd-hub - Cross-board dependency sync webhook service
//!
//! Keeps linked items on other boards in step with their source item:
//! renames, column changes, archives and deletes propagate to the first
//! matching item in the dependency group, and its assignees are notified.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use xbd_common::config::Config;
use xbd_hub::monday::MondayClient;
use xbd_hub::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "xbd-hub", about = "Cross-board dependency sync service")]
struct Args {
    /// Path to a TOML config file (overrides XBD_CONFIG and the default path)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Override the listen port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Cross-Board Dependency Sync (xbd-hub) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let client = MondayClient::new(config.api_url.clone())?;
    let bind = format!("{}:{}", config.host, config.port);

    let state = AppState::new(config, Arc::new(client));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("xbd-hub listening on http://{}", bind);
    info!("Webhook endpoint: http://{}/webhooks/dependency", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
