// ABOUTME: Server binary for the teen fitness coaching API
// ABOUTME: Loads env config, wires Gemini and file storage, serves axum until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Teen Fitness Coach Server Binary

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teen_fitness_coach::{
    config::CoachConfig,
    gateway::AiGateway,
    llm::GeminiProvider,
    logging,
    resources::CoachResources,
    routes,
    storage::FileSlot,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "teen-fitness-coach")]
#[command(about = "Teen Fitness Coach - AI workout, diet and progress coaching API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the directory holding session data
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CoachConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    let provider = GeminiProvider::from_config(&config.llm)
        .context("Gemini provider could not be configured")?;
    let mut gateway = AiGateway::new(Arc::new(provider)).with_model(config.llm.model.clone());
    if let Some(temperature) = config.llm.temperature {
        gateway = gateway.with_temperature(temperature);
    }

    let slot = FileSlot::open(&config.data_dir)
        .await
        .context("Session data directory is not usable")?;
    info!(data_dir = %slot.root().display(), "Measurement storage ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let resources = Arc::new(CoachResources::new(config, Arc::new(slot), gateway));
    let app = routes::router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    info!(%addr, "Teen Fitness Coach listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Teen Fitness Coach stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
