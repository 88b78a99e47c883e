use async_trait::async_trait;
use std::sync::Arc;

use openvz_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{GetJobStatus, JobStatusView},
    },
    uow::UnitOfWork,
};

pub struct GetJobStatusHandler {}

impl GetJobStatusHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetJobStatus> for GetJobStatusHandler {
    async fn handle(
        &self,
        query: GetJobStatus,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetJobStatus as Query>::Output, ApplicationError> {
        let job = uow.jobs().get_by_id(query.id).await?;

        Ok(JobStatusView {
            status: job.status.label().to_string(),
            entity_type: job.entity_type,
            entity_id: job.entity_id,
        })
    }
}
