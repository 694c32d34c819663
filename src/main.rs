use egg_ledger::state::DynStore;
use egg_ledger::{router, AppConfig, AppState, FileStore, HarvestLedger};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    info!(
        "using store {:?} (key {}, locale {:?})",
        config.data_path, config.store_key, config.locale
    );

    let store: DynStore = Box::new(FileStore::new(
        &config.data_path,
        &config.store_key,
        config.store_capacity,
    ));
    let ledger = HarvestLedger::open(store, config.locale);
    let app = router(AppState::new(ledger));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
