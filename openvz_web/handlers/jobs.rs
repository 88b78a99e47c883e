use axum::extract::{Path, State};

use openvz_app::{
    cqrs::queries::{GetJobStatus, JobStatusView},
    queries_handlers::GetJobStatusHandler,
};

use crate::{
    handlers::api_response::{ApiError, ApiResponse, parse_id},
    http::AppState,
};

/// GET /v0.1/jobs/{id} – Poll the status of a deferred job.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<JobStatusView>, ApiError> {
    let id = parse_id(&id)?;
    let view = state
        .app_bus
        .query(GetJobStatus { id }, GetJobStatusHandler::new())
        .await?;

    Ok(ApiResponse::success(view))
}
