// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use config::{AppConfig, Args};
use std::net::SocketAddr;
use substrate_transfer_api::{app, logging, state::AppState};

#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = AppConfig::from_env_file(&args.env_file)
        .with_context(|| format!("Failed to load configuration from {}", args.env_file))?;

    let _log_guard = logging::init(&config.log)?;

    tracing::info!(
        substrate_url = %config.substrate.url,
        log_level = %config.log.level,
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let addr: SocketAddr = format!("{}:{}", config.express.bind_host, config.express.port)
        .parse()
        .context("Invalid listen address")?;

    let state = AppState::new(config).await?;
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
