use async_trait::async_trait;
use std::sync::Arc;

use openvz_types::{container::ContainerParameters, errors::CommandError};

use crate::config::{CommanderKind, Config};

mod stub;
mod vzctl;

pub use stub::StubCommander;
pub use vzctl::VzctlCommander;

/// The external layer that actually provisions containers on the host.
/// Calls are not retried and not assumed idempotent.
#[async_trait]
pub trait ContainerCommander: Send + Sync {
    async fn create_container(
        &self,
        name: &str,
        os_template: &str,
        options: Option<&ContainerParameters>,
    ) -> Result<(), CommandError>;

    async fn set_parameters(
        &self,
        name: &str,
        parameters: &ContainerParameters,
    ) -> Result<(), CommandError>;

    async fn delete_container(&self, name: &str) -> Result<(), CommandError>;
}

pub fn build_commander(config: &Config) -> Arc<dyn ContainerCommander> {
    match config.commander {
        CommanderKind::Stub => Arc::new(StubCommander::new()),
        CommanderKind::Vzctl => Arc::new(VzctlCommander::new(config.vzctl_path.clone())),
    }
}
