use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::router::build_router;
use crate::state::AppState;

/// The ARCA archive server.
pub struct ArcaServer {
    config: ServerConfig,
    state: AppState,
}

impl ArcaServer {
    /// Build the full service stack from configuration.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let state = AppState::build(&config)?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> anyhow::Result<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("ARCA server listening on {}", self.config.bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
