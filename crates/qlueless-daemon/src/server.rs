//! Server setup and lifecycle management

use crate::api::rest::{create_router, AppState};
use crate::config::{DaemonConfig, StorageConfig};
use crate::content::StaticContent;
use crate::error::{DaemonError, DaemonResult};
use crate::storage::{InMemoryStorage, SqliteStorage, VentureStorage, WorkItemStorage};
use axum::Router;
use qlueless_types::{dummy_work_items, WorkItemKind};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Qlueless API server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Open storage, seed work items and preload static content
    pub async fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let work_items = Arc::new(InMemoryStorage::new());
        for kind in [WorkItemKind::Thing, WorkItemKind::Order] {
            for item in dummy_work_items() {
                work_items.insert_work_item(kind, item).await?;
            }
        }

        let ventures: Arc<dyn VentureStorage> = match &config.storage {
            StorageConfig::Memory => {
                tracing::info!("Using in-memory venture storage");
                work_items.clone()
            }
            StorageConfig::Sqlite {
                url,
                max_connections,
                connect_timeout_secs,
            } => {
                tracing::info!(url = %url, "Using SQLite venture storage");
                Arc::new(SqliteStorage::new(url, *max_connections, *connect_timeout_secs).await?)
            }
        };

        let content = StaticContent::load(&config.content).await;
        let state = AppState::new(ventures, work_items, content);

        Ok(Self { config, state })
    }

    /// The router serving this server's state
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config.server)
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Qlueless API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Qlueless API shut down");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
