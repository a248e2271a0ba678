//! HTTP server lifecycle.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use crate::infrastructure::AppConfig;

// =============================================================================
// Server
// =============================================================================

/// Binds the configured address and serves a router until shutdown.
#[derive(Debug, Clone)]
pub struct Server {
    bind_address: String,
}

impl Server {
    #[must_use]
    pub fn new(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.bind_address())
    }

    #[must_use]
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    ///
    /// Fails when the address cannot be bound or the server errors.
    pub async fn run(self, router: Router) -> anyhow::Result<()> {
        let listener = self.bind().await?;
        serve(listener, router, shutdown_signal()).await
    }

    /// Binds the listener without serving yet.
    ///
    /// # Errors
    ///
    /// Fails when the address cannot be bound.
    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        tracing::info!(address = %self.bind_address, "Binding server");
        Ok(TcpListener::bind(&self.bind_address).await?)
    }
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Fails when the listener's address cannot be read or the server errors.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

// =============================================================================
// Shutdown Signal
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
