use std::{process::ExitCode, sync::Arc};

use campus::{config::Config, error::AppError, router, startup, state::AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let store = Arc::new(startup::connect_to_database(&config).await?);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("App is running on {}", listener.local_addr()?);

    axum::serve(listener, router::app(AppState::new(store.clone())))
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.shutdown().await?,
        Err(_) => tracing::warn!("Store still in use after shutdown; skipping close"),
    }

    Ok(())
}
