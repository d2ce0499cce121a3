//! `chatrelay-server` binary: load configuration and serve the relay

use anyhow::Context;
use chatrelay_core::config::{load_from_yaml, RelayConfig};
use chatrelay_core::logging::init_tracing;
use chatrelay_core::RelayService;
use chatrelay_server::{start_server, AppState};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatrelay-server", version, about = "Stateless chat relay in front of an LLM completion API")]
struct Cli {
    /// YAML configuration file; without it settings come from the environment
    #[arg(short, long, env = "CHATRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing("chatrelay_server");

    let mut config = match &cli.config {
        Some(path) => load_from_yaml(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => RelayConfig::from_env().context("failed to load configuration from environment")?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!(
        "Relaying to {} with model {} (key {})",
        config.upstream.url,
        config.generation.model,
        config.upstream.api_key.partial_redact()
    );

    let relay = RelayService::from_config(&config).context("failed to build upstream client")?;
    start_server(AppState::new(relay), &config.server.bind_address()).await
}
