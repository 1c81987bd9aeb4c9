// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ai_app_backend::{
    api::{start_server, AppState},
    config::ServerConfig,
};
use anyhow::Result;
use clap::Parser;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    info!(
        "Starting AI App Backend v{} (mock latency {}ms, {} extra blocked terms)",
        env!("CARGO_PKG_VERSION"),
        config.mock_latency_ms,
        config.blocked_terms.len()
    );

    let state = AppState::from_config(&config);
    start_server(&config, state).await
}
