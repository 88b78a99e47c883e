use serde::{Deserialize, Serialize};
use serde_json::Value;

use openvz_types::errors::AppError;

use crate::jobs::Job;

pub const ADD_CONTAINER_JOB: &str = "add-container";

/// `entity_type` recorded on jobs that produced a container.
pub const CONTAINER_ENTITY: &str = "container";

/// Payload of an "add-container" job: `{"name": ..., "ostemplate": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddContainerTask {
    pub name: String,
    #[serde(rename = "ostemplate")]
    pub os_template: String,
}

/// Every kind of work the worker knows how to run, keyed by `Job::job_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTask {
    AddContainer(AddContainerTask),
}

impl JobTask {
    pub fn job_type(&self) -> &'static str {
        match self {
            JobTask::AddContainer(_) => ADD_CONTAINER_JOB,
        }
    }

    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            JobTask::AddContainer(task) => serde_json::to_value(task),
        }
    }

    /// Decodes the job payload according to its type tag.
    pub fn decode(job: &Job) -> Result<Self, AppError> {
        match job.job_type.as_str() {
            ADD_CONTAINER_JOB => serde_json::from_value(job.payload.clone())
                .map(JobTask::AddContainer)
                .map_err(|source| AppError::MalformedJobPayload {
                    job_id: job.id,
                    source,
                }),
            other => Err(AppError::UnknownJobType(other.to_string())),
        }
    }
}

impl From<AddContainerTask> for JobTask {
    fn from(task: AddContainerTask) -> Self {
        JobTask::AddContainer(task)
    }
}
