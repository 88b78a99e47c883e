use uuid::Uuid;

use openvz_types::container::ContainerParameters;

use crate::cqrs::Command;

/// Requests a new container. Creation is deferred to the job worker:
/// the command only enqueues a job with id `job_id`.
#[derive(Debug, Clone)]
pub struct AddContainer {
    pub job_id: Uuid,
    pub name: String,
    pub os_template: String,
}

impl AddContainer {
    pub fn new(name: String, os_template: String) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            name,
            os_template,
        }
    }
}

impl Command for AddContainer {}

#[derive(Debug, Clone)]
pub struct UpdateContainer {
    pub id: Uuid,
    pub parameters: ContainerParameters,
}

impl Command for UpdateContainer {}

#[derive(Debug, Clone)]
pub struct DeleteContainer {
    pub id: Uuid,
}

impl Command for DeleteContainer {}
