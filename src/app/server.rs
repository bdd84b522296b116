use crate::app::routes;
use crate::app::state::AppState;
use crate::config::SiteConfig;
use crate::utils::validation::Validate;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// Configures and initializes a [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: SiteConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: SiteConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Validates the configuration, loads the catalog and wires the lead sink.
    pub fn build(self) -> Result<Server> {
        self.cfg
            .validate()
            .context("Configuration validation failed")?;

        let address = SocketAddr::new(self.cfg.server.host, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let state = AppState::from_config(&self.cfg).context("Failed to build application state")?;
        Ok(Server { address, state })
    }
}

#[must_use = "call .run().await to start the server"]
pub struct Server {
    address: SocketAddr,
    state: AppState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.address)
            .await
            .with_context(|| format!("Failed to bind {}", self.address))?;
        info!("🚀 Listening on http://{}", listener.local_addr()?);

        let app = routes::router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if let Err(e) = shutdown_signal().await {
                    error!("Error while waiting for shutdown signal: {e}");
                    std::future::pending::<()>().await;
                }
                info!("Shutdown signal received, starting graceful shutdown...");
            })
            .await
            .context("HTTP server failed")?;

        info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
