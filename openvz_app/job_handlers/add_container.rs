use async_trait::async_trait;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use openvz_types::{
    container::Container,
    errors::{AppError, ApplicationError},
};

use crate::{
    jobs::{
        Job,
        handler::{JobHandler, JobHandlerContext},
        tasks::{AddContainerTask, CONTAINER_ENTITY},
    },
    uow::UnitOfWork,
};

pub struct AddContainerJobHandler {
    pub payload: AddContainerTask,
}

impl AddContainerJobHandler {
    pub fn new(payload: AddContainerTask) -> Self {
        Self { payload }
    }

    async fn record_container(
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        job_id: Uuid,
        container: &Container,
    ) -> Result<(), ApplicationError> {
        uow.containers().add(container).await?;
        uow.jobs()
            .mark_as_done(job_id, CONTAINER_ENTITY, &container.id.to_string())
            .await
    }

    async fn record_failure(
        ctx: &JobHandlerContext,
        job_id: Uuid,
        error_descr: &str,
    ) -> Result<(), ApplicationError> {
        let uow = ctx.uow_provider.begin().await?;
        let result = uow.jobs().mark_as_failed(job_id, error_descr).await;
        match result {
            Ok(()) => uow.commit().await,
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl JobHandler for AddContainerJobHandler {
    #[instrument(skip_all, fields(
        task_type = "add-container",
        job_id = %job.id,
        name = %self.payload.name,
        os_template = %self.payload.os_template,
    ))]
    async fn handle(&self, ctx: &JobHandlerContext, job: &Job) -> Result<(), ApplicationError> {
        if let Err(e) = ctx
            .commander
            .create_container(&self.payload.name, &self.payload.os_template, None)
            .await
        {
            warn!(error = %e, "Container creation failed");
            return Self::record_failure(ctx, job.id, &e.to_string()).await;
        }

        let container = Container::new(
            Uuid::new_v4(),
            self.payload.name.clone(),
            self.payload.os_template.clone(),
        );

        let uow = ctx.uow_provider.begin().await?;
        match Self::record_container(&uow, job.id, &container).await {
            Ok(()) => {
                uow.commit().await?;
                info!(container_id = %container.id, "Container created");
                Ok(())
            }
            // Another job took the name between enqueue and now.
            Err(ApplicationError::App(e @ AppError::DuplicateContainerName(_))) => {
                uow.rollback().await?;
                warn!(error = %e, "Container name taken before the job finished");
                Self::record_failure(ctx, job.id, &e.to_string()).await
            }
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::Arc;

    use super::*;
    use crate::{
        jobs::{JobStatus, tasks::ADD_CONTAINER_JOB},
        repository::{ContainerRepository, JobRepository},
        test_utils::tests::{FailingCommander, MockUnitOfWorkProvider, RecordingCommander},
        uow::UnitOfWorkProvider,
    };

    fn task(name: &str) -> AddContainerTask {
        AddContainerTask {
            name: name.to_string(),
            os_template: "ubuntu20".to_string(),
        }
    }

    async fn seed_job(provider: &MockUnitOfWorkProvider, task: &AddContainerTask) -> Job {
        let job = Job::new(Uuid::new_v4(), ADD_CONTAINER_JOB, json!(task));
        provider.jobs.add(&job).await.unwrap();
        provider.jobs.lock(job.id, chrono::Utc::now()).await.unwrap();
        provider.jobs.get_by_id(job.id).await.unwrap()
    }

    #[tokio::test]
    async fn test_success_links_job_to_new_container() {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let commander = Arc::new(RecordingCommander::new());
        let ctx = JobHandlerContext {
            uow_provider: provider.clone(),
            commander: commander.clone(),
        };
        let job = seed_job(&provider, &task("web1")).await;

        AddContainerJobHandler::new(task("web1"))
            .handle(&ctx, &job)
            .await
            .unwrap();

        assert_eq!(commander.created(), vec![("web1".to_string(), "ubuntu20".to_string())]);

        let job = provider.jobs.get_by_id(job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert!(job.locked_at.is_none());
        assert_eq!(job.entity_type.as_deref(), Some("container"));

        let container_id: Uuid = job.entity_id.unwrap().parse().unwrap();
        let container = provider.containers.get_by_id(container_id).await.unwrap();
        assert_eq!(container.name, "web1");
        assert_eq!(container.os_template, "ubuntu20");
    }

    #[tokio::test]
    async fn test_command_failure_marks_job_failed() {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let ctx = JobHandlerContext {
            uow_provider: provider.clone(),
            commander: Arc::new(FailingCommander::new("template not found")),
        };
        let job = seed_job(&provider, &task("web1")).await;

        AddContainerJobHandler::new(task("web1"))
            .handle(&ctx, &job)
            .await
            .unwrap();

        let job = provider.jobs.get_by_id(job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.locked_at.is_none());
        assert_eq!(job.error_descr.as_deref(), Some("template not found"));
        assert!(job.entity_id.is_none());
        assert!(!provider.containers.exists_with_name("web1").await.unwrap());
    }

    #[tokio::test]
    async fn test_name_taken_after_enqueue_marks_job_failed() {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let ctx = JobHandlerContext {
            uow_provider: provider.clone(),
            commander: Arc::new(RecordingCommander::new()),
        };
        let first = seed_job(&provider, &task("web1")).await;
        let second = seed_job(&provider, &task("web1")).await;

        let handler = AddContainerJobHandler::new(task("web1"));
        handler.handle(&ctx, &first).await.unwrap();
        handler.handle(&ctx, &second).await.unwrap();

        let first = provider.jobs.get_by_id(first.id).await.unwrap();
        let second = provider.jobs.get_by_id(second.id).await.unwrap();
        assert_eq!(first.status, JobStatus::Done);
        assert_eq!(second.status, JobStatus::Failed);
        assert!(second.error_descr.unwrap().contains("already exists"));
        assert_eq!(provider.containers.len(), 1);

        let uow = provider.begin().await.unwrap();
        assert!(uow.containers().exists_with_name("web1").await.unwrap());
    }
}
