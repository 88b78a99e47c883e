use std::sync::Arc;
use tracing::info;

use openvz_types::errors::ApplicationError;

use crate::{
    commander::ContainerCommander,
    config::Config,
    cqrs::{CommandHandler, commands::UpdateContainer},
    uow::UnitOfWork,
};

/// Applies new parameters to a container. Runs the commander synchronously;
/// parameters are only stored once the host accepted them.
pub struct UpdateContainerCommandHandler {
    commander: Arc<dyn ContainerCommander>,
}

impl UpdateContainerCommandHandler {
    pub fn new(commander: Arc<dyn ContainerCommander>) -> Self {
        Self { commander }
    }
}

#[async_trait::async_trait]
impl CommandHandler<UpdateContainer> for UpdateContainerCommandHandler {
    async fn handle(
        &self,
        command: UpdateContainer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let containers = uow.containers();
        let container = containers.get_by_id(command.id).await?;

        self.commander
            .set_parameters(&container.name, &command.parameters)
            .await?;
        containers
            .update_parameters(container.id, &command.parameters)
            .await?;

        info!(container_id = %container.id, name = %container.name, "Container parameters updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use openvz_types::{
        container::{Container, ContainerParameters},
        errors::{CommandError, DbError},
    };
    use uuid::Uuid;

    use super::*;
    use crate::{
        repository::ContainerRepository,
        test_utils::tests::{FailingCommander, MockUnitOfWorkProvider, RecordingCommander},
        uow::UnitOfWorkProvider,
    };

    fn parameters() -> ContainerParameters {
        ContainerParameters::from([("ram".to_string(), "2G".to_string())])
    }

    #[tokio::test]
    async fn test_update_stores_parameters_after_commander() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        let container = Container::new(Uuid::new_v4(), "web1".into(), "ubuntu20".into());
        provider.containers.add(&container).await.unwrap();
        let commander = Arc::new(RecordingCommander::new());
        let uow = provider.begin().await.unwrap();

        let command = UpdateContainer {
            id: container.id,
            parameters: parameters(),
        };
        UpdateContainerCommandHandler::new(commander.clone())
            .handle(command, &uow, &config)
            .await
            .unwrap();

        assert_eq!(commander.updated(), vec![("web1".to_string(), parameters())]);
        let stored = provider.containers.get_by_id(container.id).await.unwrap();
        assert_eq!(stored.parameters, parameters());
    }

    #[tokio::test]
    async fn test_commander_failure_keeps_old_parameters() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        let container = Container::new(Uuid::new_v4(), "web1".into(), "ubuntu20".into());
        provider.containers.add(&container).await.unwrap();
        let uow = provider.begin().await.unwrap();

        let command = UpdateContainer {
            id: container.id,
            parameters: parameters(),
        };
        let err = UpdateContainerCommandHandler::new(Arc::new(FailingCommander::new("busy")))
            .handle(command, &uow, &config)
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Command(CommandError::Rejected(_))));
        let stored = provider.containers.get_by_id(container.id).await.unwrap();
        assert!(stored.parameters.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_container() {
        let config = Arc::new(Config::default());
        let provider = MockUnitOfWorkProvider::new();
        let uow = provider.begin().await.unwrap();
        let id = Uuid::new_v4();

        let err = UpdateContainerCommandHandler::new(Arc::new(RecordingCommander::new()))
            .handle(
                UpdateContainer {
                    id,
                    parameters: parameters(),
                },
                &uow,
                &config,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Db(DbError::ContainerNotFound(i)) if i == id));
    }
}
