use std::sync::Arc;
use tracing::info;

use openvz_types::errors::{AppError, ApplicationError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::AddContainer},
    jobs::{
        Job,
        tasks::{AddContainerTask, JobTask},
    },
    uow::UnitOfWork,
};

/// Enqueues an "add-container" job. The container itself is created later
/// by the job worker.
pub struct AddContainerCommandHandler {}

impl AddContainerCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AddContainer> for AddContainerCommandHandler {
    async fn handle(
        &self,
        command: AddContainer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        if command.name.is_empty() {
            return Err(AppError::MissingParameter("name").into());
        }
        if command.os_template.is_empty() {
            return Err(AppError::MissingParameter("ostemplate").into());
        }

        // Not atomic with the insert below: two concurrent requests can both pass.
        // The containers.name unique constraint catches the loser when its job finishes.
        if uow.containers().exists_with_name(&command.name).await? {
            return Err(AppError::DuplicateContainerName(command.name).into());
        }

        let task = JobTask::from(AddContainerTask {
            name: command.name,
            os_template: command.os_template,
        });
        let job = Job::new(command.job_id, task.job_type(), task.payload()?);
        uow.jobs().add(&job).await?;

        info!(job_id = %job.id, job_type = %job.job_type, "Job enqueued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use openvz_types::container::Container;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::{
        jobs::JobStatus,
        repository::{ContainerRepository, JobRepository},
        test_utils::tests::MockUnitOfWorkProvider,
        uow::UnitOfWorkProvider,
    };

    #[tokio::test]
    async fn test_add_container_enqueues_pending_job() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        let uow = provider.begin().await.unwrap();
        let handler = AddContainerCommandHandler::new();

        let command = AddContainer::new("web1".to_string(), "ubuntu20".to_string());
        let job_id = command.job_id;
        handler.handle(command, &uow, &config).await.unwrap();

        let job = uow.jobs().get_by_id(job_id).await.unwrap();
        assert_eq!(job.job_type, "add-container");
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.locked_at.is_none());
        assert_eq!(job.payload, json!({"name": "web1", "ostemplate": "ubuntu20"}));
        assert!(provider.containers.is_empty(), "container is created by the worker");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected_without_writing() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        provider
            .containers
            .add(&Container::new(Uuid::new_v4(), "web1".into(), "ubuntu20".into()))
            .await
            .unwrap();
        let uow = provider.begin().await.unwrap();

        let command = AddContainer::new("web1".to_string(), "debian11".to_string());
        let result = AddContainerCommandHandler::new()
            .handle(command, &uow, &config)
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::DuplicateContainerName(ref n))) if n == "web1"
        ));
        assert!(provider.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        provider
            .containers
            .add(&Container::new(Uuid::new_v4(), "web1".into(), "ubuntu20".into()))
            .await
            .unwrap();
        let uow = provider.begin().await.unwrap();

        let command = AddContainer::new("WEB1".to_string(), "ubuntu20".to_string());
        AddContainerCommandHandler::new()
            .handle(command, &uow, &config)
            .await
            .unwrap();

        assert_eq!(provider.jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        let uow = provider.begin().await.unwrap();
        let handler = AddContainerCommandHandler::new();

        let err = handler
            .handle(AddContainer::new(String::new(), "ubuntu20".into()), &uow, &config)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "name is missing or empty");

        let err = handler
            .handle(AddContainer::new("web1".into(), String::new()), &uow, &config)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "ostemplate is missing or empty");

        assert!(provider.jobs.is_empty());
    }
}
