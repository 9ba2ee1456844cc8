use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

use school_ops_backend::{
    app::create_router,
    app_state::AppState,
    clock::SystemClock,
    config, db,
    policy::DeadlinePolicy,
    telemetry::{init_telemetry, TelemetryConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init().context("Failed to load configuration")?;
    let telemetry = init_telemetry(Some(TelemetryConfig::from_config(config))).await?;

    let store = db::init_store(&config.store).await?;
    let deadlines = DeadlinePolicy::new(config.policy.deadline_day);
    info!(
        backend = ?config.store.backend,
        deadline_day = deadlines.deadline_day(),
        production = config.is_production(),
        "Store ready"
    );

    let state = AppState::new(store, Arc::new(SystemClock), deadlines);
    let app = create_router(state);

    let addr = config.server_addr();
    info!("{} listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
