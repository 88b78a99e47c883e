
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use openvz_app::{
    command_handlers::AddContainerCommandHandler,
    commander::StubCommander,
    cqrs::{commands::AddContainer, queries::GetJobStatus},
    jobs::{Job, JobStatus},
    queries_handlers::GetJobStatusHandler,
    repository::{ContainerRepository, JobRepository},
    test_utils::tests::FailingCommander,
    uow::UnitOfWorkProvider,
};
use openvz_types::{
    Result,
    container::Container,
    errors::{AppError, ApplicationError},
};

use test_utils::tests::setup_app;

#[tokio::test]
#[ignore = "needs a Postgres database at TEST_DATABASE_URL"]
async fn test_container_is_created_through_the_job_queue() -> Result<()> {
    let (app_bus, worker, uow_provider, _) = setup_app(Arc::new(StubCommander::new())).await?;

    let command = AddContainer::new("web1".to_string(), "ubuntu20".to_string());
    let job_id = command.job_id;
    app_bus
        .execute(command, AddContainerCommandHandler::new())
        .await?;

    let view = app_bus
        .query(GetJobStatus { id: job_id }, GetJobStatusHandler::new())
        .await?;
    assert_eq!(view.status, "pending");

    assert_eq!(worker.run_once().await?, Some(job_id));

    let view = app_bus
        .query(GetJobStatus { id: job_id }, GetJobStatusHandler::new())
        .await?;
    assert_eq!(view.status, "done");
    assert_eq!(view.entity_type.as_deref(), Some("container"));

    let container_id: Uuid = view.entity_id.unwrap().parse().unwrap();
    let uow = uow_provider.begin().await?;
    let container = uow.containers().get_by_id(container_id).await?;
    assert_eq!(container.name, "web1");
    assert_eq!(container.os_template, "ubuntu20");

    let job = uow.jobs().get_by_id(job_id).await?;
    assert!(job.locked_at.is_none());

    let again = AddContainer::new("web1".to_string(), "debian11".to_string());
    let result = app_bus
        .execute(again, AddContainerCommandHandler::new())
        .await;
    assert!(matches!(
        result,
        Err(ApplicationError::App(AppError::DuplicateContainerName(_)))
    ));

    Ok(())
}

#[tokio::test]
#[ignore = "needs a Postgres database at TEST_DATABASE_URL"]
async fn test_failed_command_fails_the_job() -> Result<()> {
    let commander = Arc::new(FailingCommander::new("template not found"));
    let (app_bus, worker, uow_provider, _) = setup_app(commander).await?;

    let command = AddContainer::new("web2".to_string(), "nope".to_string());
    let job_id = command.job_id;
    app_bus
        .execute(command, AddContainerCommandHandler::new())
        .await?;
    worker.run_once().await?;

    let uow = uow_provider.begin().await?;
    let job = uow.jobs().get_by_id(job_id).await?;
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error_descr.as_deref(), Some("template not found"));
    assert!(job.locked_at.is_none());
    assert!(job.entity_id.is_none());
    assert!(!uow.containers().exists_with_name("web2").await?);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a Postgres database at TEST_DATABASE_URL"]
async fn test_unknown_job_type_is_left_locked() -> Result<()> {
    let (_, worker, uow_provider, _) = setup_app(Arc::new(StubCommander::new())).await?;

    let job = Job::new(Uuid::new_v4(), "snapshot-container", json!({"name": "web3"}));
    {
        let uow = uow_provider.begin().await?;
        uow.jobs().add(&job).await?;
        uow.commit().await?;
    }

    assert!(worker.run_once().await.is_err());

    let uow = uow_provider.begin().await?;
    let stored = uow.jobs().get_by_id(job.id).await?;
    assert_eq!(stored.status, JobStatus::Pending);
    assert!(stored.locked_at.is_some());
    assert!(uow.jobs().find_claim_candidate().await?.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "needs a Postgres database at TEST_DATABASE_URL"]
async fn test_unique_name_is_enforced_by_storage() -> Result<()> {
    let (_, _, uow_provider, _) = setup_app(Arc::new(StubCommander::new())).await?;
    let uow = uow_provider.begin().await?;

    let first = Container::new(Uuid::new_v4(), "web4".to_string(), "centos7".to_string());
    uow.containers().add(&first).await?;

    let clash = Container::new(Uuid::new_v4(), "web4".to_string(), "centos8".to_string());
    let err = uow.containers().add(&clash).await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::App(AppError::DuplicateContainerName(name)) if name == "web4"
    ));

    Ok(())
}
