//! Server Implementation
//!
//! HTTP server startup and graceful shutdown

use std::net::SocketAddr;
use std::time::Duration;

use crate::core::{Config, Result, ServerError, ServerState};
use crate::services::build_router;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let app = build_router(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!("Recipe server listening on {}", addr);

        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(grace))
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolves on ctrl-c, then arms a hard deadline for in-flight requests
async fn shutdown_signal(grace: Duration) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::warn!("Graceful shutdown timed out after {:?}, exiting", grace);
        std::process::exit(1);
    });
}
