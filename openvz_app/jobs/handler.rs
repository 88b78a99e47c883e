use async_trait::async_trait;
use std::sync::Arc;

use openvz_types::errors::ApplicationError;

use crate::{commander::ContainerCommander, jobs::Job, uow::UnitOfWorkProvider};

/// Context which contains JobHandler dependencies.
///
/// Handlers open their own Units of Work: the command layer runs outside
/// of any storage transaction.
pub struct JobHandlerContext {
    pub uow_provider: Arc<dyn UnitOfWorkProvider>,
    pub commander: Arc<dyn ContainerCommander>,
}

#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Executes a claimed job and records its terminal status.
    /// Errors returned here are storage failures; execution failures are
    /// recorded on the job instead.
    async fn handle(&self, ctx: &JobHandlerContext, job: &Job) -> Result<(), ApplicationError>;
}
