use async_trait::async_trait;
use tracing::info;

use openvz_types::{container::ContainerParameters, errors::CommandError};

use super::ContainerCommander;

/// Proof-of-concept commander: logs what it would run and always succeeds.
#[derive(Debug, Default, Clone)]
pub struct StubCommander;

impl StubCommander {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContainerCommander for StubCommander {
    async fn create_container(
        &self,
        name: &str,
        os_template: &str,
        options: Option<&ContainerParameters>,
    ) -> Result<(), CommandError> {
        info!(container = name, os_template, options = ?options, "stub: create container");
        Ok(())
    }

    async fn set_parameters(
        &self,
        name: &str,
        parameters: &ContainerParameters,
    ) -> Result<(), CommandError> {
        info!(container = name, parameters = ?parameters, "stub: set container parameters");
        Ok(())
    }

    async fn delete_container(&self, name: &str) -> Result<(), CommandError> {
        info!(container = name, "stub: delete container");
        Ok(())
    }
}
