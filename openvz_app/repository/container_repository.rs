use uuid::Uuid;

use openvz_types::{
    container::{Container, ContainerParameters},
    errors::ApplicationError,
};

#[async_trait::async_trait]
pub trait ContainerRepository: Send + Sync {
    /// Stores a new container. A name clash yields `AppError::DuplicateContainerName`.
    async fn add(&self, container: &Container) -> Result<(), ApplicationError>;

    /// Case-sensitive exact match on the container name.
    async fn exists_with_name(&self, name: &str) -> Result<bool, ApplicationError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Container, ApplicationError>;

    /// Lists containers, oldest first.
    async fn list(&self, limit: i64) -> Result<Vec<Container>, ApplicationError>;

    async fn update_parameters(
        &self,
        id: Uuid,
        parameters: &ContainerParameters,
    ) -> Result<(), ApplicationError>;

    async fn remove(&self, id: Uuid) -> Result<(), ApplicationError>;
}
