//! songslide-relay - Submission forwarder service
//!
//! Relays weekly record submissions to the Apps Script endpoint so the
//! secret script URL is never exposed to the browser. One inbound route,
//! no state, no retry; a failed request leaves the service available for
//! the next one.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

use songslide_relay::config::{RelayConfig, UPSTREAM_TIMEOUT};
use songslide_relay::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "songslide-relay", about = "Weekly record submission relay")]
struct Args {
    /// Listen port (default 4000)
    #[arg(long)]
    port: Option<u16>,

    /// Upstream script endpoint to forward submissions to
    #[arg(long)]
    script_url: Option<String>,

    /// Path to TOML config file (default ~/.config/songslide/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting songslide-relay v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let config = RelayConfig::resolve(args.port, args.script_url, args.config.as_deref())?;

    let http = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()?;

    let state = AppState::new(http, config.upstream_url);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("songslide-relay listening on http://{}", addr);
    info!("Submit endpoint: POST http://{}/api/submit", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
