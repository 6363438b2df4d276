use campus_core::{
    backend::StoreBackendBuilder,
    store::DocumentStore,
};
use campus_memory::InMemoryStore;
use campus_mongodb::MongoDbStore;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError};

const DEFAULT_LOG_FILTER: &str = "campus=info,tower_http=info";

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the document store named by the configuration.
///
/// `memory://` selects a fresh in-memory store. Anything else is treated as a
/// MongoDB connection string; the deployment is pinged before this returns, so
/// an unreachable server fails startup instead of the first request.
pub async fn connect_to_database(config: &Config) -> Result<DocumentStore, AppError> {
    if config.uses_memory_store() {
        let backend = InMemoryStore::builder().build().await?;

        tracing::warn!("Using in-memory store; data will not survive a restart");

        return Ok(DocumentStore::new(backend));
    }

    let mut builder = MongoDbStore::builder(&config.database_url);
    if let Some(name) = &config.database_name {
        builder = builder.database(name);
    }

    let backend = builder.build().await?;

    tracing::info!(database = backend.database(), "Connected to MongoDB");

    Ok(DocumentStore::new(backend))
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
