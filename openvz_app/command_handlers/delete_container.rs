use std::sync::Arc;
use tracing::info;

use openvz_types::errors::ApplicationError;

use crate::{
    commander::ContainerCommander,
    config::Config,
    cqrs::{CommandHandler, commands::DeleteContainer},
    uow::UnitOfWork,
};

/// Destroys a container on the host, then forgets it.
pub struct DeleteContainerCommandHandler {
    commander: Arc<dyn ContainerCommander>,
}

impl DeleteContainerCommandHandler {
    pub fn new(commander: Arc<dyn ContainerCommander>) -> Self {
        Self { commander }
    }
}

#[async_trait::async_trait]
impl CommandHandler<DeleteContainer> for DeleteContainerCommandHandler {
    async fn handle(
        &self,
        command: DeleteContainer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        let containers = uow.containers();
        let container = containers.get_by_id(command.id).await?;

        self.commander.delete_container(&container.name).await?;
        containers.remove(container.id).await?;

        info!(container_id = %container.id, name = %container.name, "Container deleted");
        Ok(())
    }
}
