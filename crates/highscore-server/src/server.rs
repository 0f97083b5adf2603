use std::sync::Arc;

use tokio::net::TcpListener;

use highscore_store::{FsBackend, TopicStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Highscore HTTP server backed by a directory of topic files.
pub struct HighscoreServer {
    config: ServerConfig,
    store: Arc<TopicStore<FsBackend>>,
}

impl HighscoreServer {
    /// Fails if the configured secret is unusable.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let checksummer = config.checksummer()?;
        let backend = FsBackend::new(&config.data_root);
        let store = TopicStore::with_checksummer(backend, checksummer);
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<TopicStore<FsBackend>> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.store), self.config.max_body_bytes)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        if let Err(e) = std::fs::create_dir_all(&self.config.data_root) {
            tracing::warn!(root = %self.config.data_root.display(), error = %e, "could not create data root");
        }
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            "highscore server listening on {} (data root: {})",
            self.config.bind_addr,
            self.config.data_root.display()
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
