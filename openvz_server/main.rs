use std::sync::Arc;

use openvz_app::{
    app_bus::AppBus,
    commander::{ContainerCommander, build_commander},
    config::Config,
    jobs::worker::JobWorker,
};
use openvz_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use openvz_types::{Result, errors::ApplicationError};
use openvz_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (config, app_bus, worker, commander) = setup_app().await?;
    let state = AppState::new(app_bus, commander);

    let worker = worker.run();
    let served = WebRouter::serve(state, config.port, shutdown_signal()).await;
    worker.shutdown().await;

    served
}

async fn setup_app() -> Result<
    (
        Arc<Config>,
        Arc<AppBus>,
        Arc<JobWorker>,
        Arc<dyn ContainerCommander>,
    ),
    ApplicationError,
> {
    let config = Arc::new(Config::from_env());
    let db_pool = establish_connection_pool().await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let app_bus = Arc::new(AppBus::new(config.clone(), uow_provider.clone()));
    let commander = build_commander(&config);
    tracing::info!(commander = ?config.commander, "Container commander selected");

    let worker = Arc::new(JobWorker::new(
        uow_provider.clone(),
        commander.clone(),
        config.clone(),
    ));

    Ok((config, app_bus, worker, commander))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Unable to listen for the shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
