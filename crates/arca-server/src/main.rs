use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use arca_server::{ArcaServer, ServerConfig};

/// Content-addressed document archive server.
#[derive(Parser)]
#[command(name = "arca-server", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .init();

    ArcaServer::new(config)?.serve().await
}
