//! Frontends for the pipeline.
//!
//! Provides the browser UI (axum) and a line-oriented terminal frontend.
//! Both run one query at a time to completion.

pub mod routes;
pub mod terminal;

use std::net::SocketAddr;

use crate::pipeline::RagPipeline;

/// Serves the pipeline to users.
pub struct UiServer {
    pipeline: RagPipeline,
}

impl UiServer {
    /// Create a new server.
    #[must_use]
    pub fn new(pipeline: RagPipeline) -> Self {
        Self { pipeline }
    }

    /// Run the web UI.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self, addr: SocketAddr) -> anyhow::Result<()> {
        tracing::info!(max_results = self.pipeline.max_results(), "Starting web UI");

        let router = routes::create_router(self.pipeline);
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Web UI listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("Web UI shut down");
        Ok(())
    }

    /// Run the terminal frontend on stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_terminal(self) -> anyhow::Result<()> {
        tracing::info!(max_results = self.pipeline.max_results(), "Starting terminal frontend");

        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        terminal::run(&self.pipeline, stdin, tokio::io::stdout()).await
    }
}

impl std::fmt::Debug for UiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiServer").field("pipeline", &self.pipeline).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
