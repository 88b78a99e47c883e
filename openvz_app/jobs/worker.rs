use chrono::Utc;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use openvz_types::errors::ApplicationError;

use crate::{
    commander::ContainerCommander,
    config::Config,
    job_handlers::AddContainerJobHandler,
    jobs::{
        Job,
        handler::{JobHandler, JobHandlerContext},
        tasks::JobTask,
    },
    uow::{UnitOfWork, UnitOfWorkProvider},
};

/// Responsible for polling and executing jobs, one per iteration.
pub struct JobWorker {
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    commander: Arc<dyn ContainerCommander>,
    config: Arc<Config>,
}

/// Running worker loop. Dropping the handle also stops the loop after its current iteration.
pub struct WorkerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Signals the loop to stop and waits for the current iteration to finish.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Job worker task ended abnormally: {e}");
        }
    }
}

impl JobWorker {
    pub fn new(
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        commander: Arc<dyn ContainerCommander>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            uow_provider,
            commander,
            config,
        }
    }

    /// Runs the worker loop inside a tokio task until the handle is shut down.
    pub fn run(self: Arc<Self>) -> WorkerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(interval = ?self.config.job_interval, "Job worker started");

            loop {
                if let Err(e) = self.run_once().await {
                    error!(error = %e, "Job cycle failed");
                }

                tokio::select! {
                    _ = tokio::time::sleep(self.config.job_interval) => {}
                    _ = stop_rx.changed() => break,
                }
            }

            info!("Job worker stopped");
        });

        WorkerHandle { stop_tx, task }
    }

    /// One claim -> execute -> finalize cycle.
    /// Returns the id of the processed job, or `None` when the queue is empty.
    #[instrument(skip_all)]
    pub async fn run_once(&self) -> Result<Option<Uuid>, ApplicationError> {
        let Some(job) = self.claim_next_job().await? else {
            debug!("No jobs.");
            return Ok(None);
        };

        // An undecodable job stays locked and pending; nothing reclaims it.
        let task = JobTask::decode(&job).inspect_err(|e| {
            warn!(job_id = %job.id, job_type = %job.job_type, error = %e, "Job cannot be parsed, skipped");
        })?;

        let ctx = JobHandlerContext {
            uow_provider: self.uow_provider.clone(),
            commander: self.commander.clone(),
        };

        let handler: Box<dyn JobHandler> = match task {
            JobTask::AddContainer(payload) => Box::new(AddContainerJobHandler::new(payload)),
        };
        handler.handle(&ctx, &job).await?;

        Ok(Some(job.id))
    }

    /// Picks the oldest unlocked pending job and stamps its `locked_at`.
    async fn claim_next_job(&self) -> Result<Option<Job>, ApplicationError> {
        let uow = self.uow_provider.begin().await?;

        match Self::claim(&uow).await {
            Ok(job) => {
                uow.commit().await?;
                if let Some(job) = &job {
                    info!(job_id = %job.id, job_type = %job.job_type, "Job claimed");
                }
                Ok(job)
            }
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    async fn claim(uow: &Box<dyn UnitOfWork<'_> + '_>) -> Result<Option<Job>, ApplicationError> {
        let jobs = uow.jobs();
        let Some(mut job) = jobs.find_claim_candidate().await? else {
            return Ok(None);
        };

        let locked_at = Utc::now();
        jobs.lock(job.id, locked_at).await?;
        job.locked_at = Some(locked_at);

        Ok(Some(job))
    }
}
