//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;

use larder::cache::SearchCacheHandle;
use larder::catalog::Catalogs;
use larder::config::Config;
use larder::gateway::{HandlerState, create_router_with_state};
use larder::recommend::Recommender;
use larder::scoring::ScoringPolicy;
use larder::store::SqliteRecipeStore;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::fixtures::{seed_store, write_data_dir};

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

fn startup_failed(e: impl std::fmt::Display) -> ServerStartupError {
    ServerStartupError::StartupFailed(e.to_string())
}

/// A data directory with the fixture datasets and a seeded SQLite file.
pub struct TestData {
    pub config: Config,
    _temp_dir: TempDir,
}

impl TestData {
    pub async fn create() -> Result<Self, ServerStartupError> {
        let temp_dir = TempDir::new()?;
        write_data_dir(temp_dir.path())?;

        let config = Config::with_data_dir(temp_dir.path().to_path_buf());
        config.validate().map_err(startup_failed)?;

        let store = SqliteRecipeStore::connect(&config.database_url)
            .await
            .map_err(startup_failed)?;
        seed_store(&store).await.map_err(startup_failed)?;
        store.pool().close().await;

        Ok(Self {
            config,
            _temp_dir: temp_dir,
        })
    }

    /// Builds a recommender the same way the binary does.
    pub async fn recommender(&self) -> Result<Recommender<SqliteRecipeStore>, ServerStartupError> {
        let catalogs = Catalogs::load(&self.config.catalog_sources()).map_err(startup_failed)?;
        let store = SqliteRecipeStore::connect(&self.config.database_url)
            .await
            .map_err(startup_failed)?;
        Recommender::new(Arc::new(catalogs), store, ScoringPolicy::default())
            .map_err(startup_failed)
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _data: TestData,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawns the full router over fixture files and a SQLite file database.
pub async fn spawn_test_server() -> Result<TestServer, ServerStartupError> {
    let data = TestData::create().await?;
    let recommender = data.recommender().await?;

    let state = HandlerState::new(
        Arc::new(recommender),
        SearchCacheHandle::with_capacity(data.config.search_cache_capacity),
    );
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _data: data,
    })
}
