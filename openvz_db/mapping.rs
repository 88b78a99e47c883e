use openvz_app::jobs::{Job, JobStatus};
use openvz_types::container::Container;

use crate::models as db_models;

impl From<db_models::Job> for Job {
    fn from(job: db_models::Job) -> Self {
        Job {
            id: job.id,
            job_type: job.job_type,
            payload: job.payload,
            status: JobStatus::from(job.status),
            locked_at: job.locked_at,
            error_descr: job.error_descr,
            entity_type: job.entity_type,
            entity_id: job.entity_id,
            created_at: job.created_at,
        }
    }
}

impl From<db_models::Container> for Container {
    fn from(container: db_models::Container) -> Self {
        Container {
            id: container.id,
            name: container.name,
            os_template: container.os_template,
            parameters: container.parameters.map(|p| p.0).unwrap_or_default(),
            created_at: container.created_at,
        }
    }
}
