use thiserror::Error;
use uuid::Uuid;

/// Errors for app logic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} is missing or empty")]
    MissingParameter(&'static str),

    #[error("A container with name '{0}' already exists")]
    DuplicateContainerName(String),

    #[error("No job handler for {0}")]
    UnknownJobType(String),

    #[error("Payload of job {job_id} cannot be parsed: {source}")]
    MalformedJobPayload {
        job_id: Uuid,
        #[source]
        source: serde_json::Error,
    },
}
