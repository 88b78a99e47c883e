use axum::{Router, routing::get};
use std::{future::Future, io::Error, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use openvz_app::{app_bus::AppBus, commander::ContainerCommander};
use openvz_types::{Result, errors::ApplicationError};

use crate::handlers::{
    create_container, delete_container, get_container, get_job, list_containers,
    update_container,
};

#[derive(Clone)]
pub struct AppState {
    pub app_bus: Arc<AppBus>,
    pub commander: Arc<dyn ContainerCommander>,
}

impl AppState {
    pub fn new(app_bus: Arc<AppBus>, commander: Arc<dyn ContainerCommander>) -> AppState {
        AppState { app_bus, commander }
    }
}

pub struct WebRouter {}

impl WebRouter {
    /// Routes of the v0.1 API.
    pub fn router(state: AppState) -> Router {
        let api = Router::new()
            .route("/containers", get(list_containers).post(create_container))
            .route(
                "/containers/{id}",
                get(get_container)
                    .patch(update_container)
                    .delete(delete_container),
            )
            .route("/jobs/{id}", get(get_job));

        Router::new()
            .nest("/v0.1", api)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Serves the API until `shutdown` resolves.
    pub async fn serve<F>(state: AppState, port: u16, shutdown: F) -> Result<(), ApplicationError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = Self::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(infra_error)?;

        tracing::info!(
            "HTTP Server started, listening on http://{}",
            addr.to_string()
        );
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
