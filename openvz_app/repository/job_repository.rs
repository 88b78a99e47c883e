use chrono::{DateTime, Utc};
use uuid::Uuid;

use openvz_types::errors::ApplicationError;

use crate::jobs::Job;

#[async_trait::async_trait]
pub trait JobRepository: Send + Sync {
    /// Creates a new job on the db.
    async fn add(&self, job: &Job) -> Result<(), ApplicationError>;

    /// Find a job by id.
    async fn get_by_id(&self, id: Uuid) -> Result<Job, ApplicationError>;

    /// Finds the oldest pending job nobody holds a lock on, if any.
    async fn find_claim_candidate(&self) -> Result<Option<Job>, ApplicationError>;

    /// Marks a job as held by a worker. Plain write, not a compare-and-swap.
    async fn lock(&self, job_id: Uuid, locked_at: DateTime<Utc>) -> Result<(), ApplicationError>;

    /// Set job status to "Done", release the lock and link the produced entity.
    async fn mark_as_done(
        &self,
        job_id: Uuid,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<(), ApplicationError>;

    /// Set job status to "Failed", release the lock and store the error.
    async fn mark_as_failed(&self, job_id: Uuid, error_descr: &str)
    -> Result<(), ApplicationError>;
}
