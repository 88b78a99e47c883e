use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use openvz_app::{
    command_handlers::{
        AddContainerCommandHandler, DeleteContainerCommandHandler, UpdateContainerCommandHandler,
    },
    cqrs::{
        commands::{AddContainer, DeleteContainer, UpdateContainer},
        queries::{GetContainerById, ListContainers},
    },
    queries_handlers::{GetContainerByIdHandler, ListContainersHandler},
};
use openvz_types::container::{Container, ContainerParameters};

use crate::{
    handlers::api_response::{ApiError, ApiResponse, Empty, parse_id},
    http::AppState,
};

/// Missing fields decode as empty strings so they reach validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContainerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "ostemplate")]
    pub os_template: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContainerRequest {
    #[serde(default)]
    pub parameters: ContainerParameters,
}

#[derive(Debug, Serialize)]
pub struct JobCreated {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ContainerBody {
    pub container: Container,
}

#[derive(Debug, Serialize)]
pub struct ContainerList {
    pub containers: Vec<Container>,
}

/// POST /v0.1/containers – Enqueue the creation of a container.
pub async fn create_container(
    State(state): State<AppState>,
    payload: Result<Json<CreateContainerRequest>, JsonRejection>,
) -> Result<ApiResponse<JobCreated>, ApiError> {
    let Json(request) = payload?;

    let command = AddContainer::new(request.name, request.os_template);
    let job_id = command.job_id;
    state
        .app_bus
        .execute(command, AddContainerCommandHandler::new())
        .await?;

    Ok(ApiResponse::success(JobCreated { job_id }))
}

/// GET /v0.1/containers
pub async fn list_containers(
    State(state): State<AppState>,
) -> Result<ApiResponse<ContainerList>, ApiError> {
    let containers = state
        .app_bus
        .query(ListContainers::default(), ListContainersHandler::new())
        .await?;

    Ok(ApiResponse::success(ContainerList { containers }))
}

/// GET /v0.1/containers/{id}
pub async fn get_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ContainerBody>, ApiError> {
    let id = parse_id(&id)?;
    let container = state
        .app_bus
        .query(GetContainerById { id }, GetContainerByIdHandler::new())
        .await?;

    Ok(ApiResponse::success(ContainerBody { container }))
}

/// PATCH /v0.1/containers/{id} – Apply parameters through the commander.
pub async fn update_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateContainerRequest>, JsonRejection>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;

    let command = UpdateContainer {
        id,
        parameters: request.parameters,
    };
    state
        .app_bus
        .execute(
            command,
            UpdateContainerCommandHandler::new(state.commander.clone()),
        )
        .await?;

    Ok(ApiResponse::success(Empty {}))
}

/// DELETE /v0.1/containers/{id}
pub async fn delete_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Empty>, ApiError> {
    let id = parse_id(&id)?;
    state
        .app_bus
        .execute(
            DeleteContainer { id },
            DeleteContainerCommandHandler::new(state.commander.clone()),
        )
        .await?;

    Ok(ApiResponse::success(Empty {}))
}
