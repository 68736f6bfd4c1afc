//! Larder HTTP server entrypoint.

use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use larder::cache::SearchCacheHandle;
use larder::catalog::Catalogs;
use larder::config::Config;
use larder::gateway::{HandlerState, cors_layer, create_router_with_state};
use larder::recommend::Recommender;
use larder::scoring::ScoringPolicy;
use larder::store::SqliteRecipeStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr = config.socket_addr();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        data_dir = %config.data_dir.display(),
        "Larder starting"
    );

    let policy = ScoringPolicy::from_env()?;
    tracing::info!(
        alpha = policy.alpha,
        min_ingredients = policy.min_ingredients,
        formula = %policy.formula,
        "Scoring policy loaded"
    );

    // Catalogs are immutable from here on; load them before accepting traffic.
    let catalogs = Arc::new(Catalogs::load(&config.catalog_sources())?);

    let store = SqliteRecipeStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;
    store.health_check().await?;
    tracing::info!(url = %store.url(), "Recipe store connected");

    let recommender = Arc::new(Recommender::new(catalogs, store, policy)?);
    let search_cache = SearchCacheHandle::with_capacity(config.search_cache_capacity);
    let state = HandlerState::new(recommender, search_cache);

    let app = create_router_with_state(state).layer(cors_layer(&config.cors_origins));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Larder shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("LARDER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
