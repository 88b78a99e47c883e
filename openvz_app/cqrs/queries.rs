use serde::Serialize;
use uuid::Uuid;

use openvz_types::container::Container;

use crate::cqrs::Query;

/// Fetch the client-facing status of a job.
pub struct GetJobStatus {
    pub id: Uuid,
}

/// What a client polling a job gets back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatusView {
    /// One of "pending", "done", "failed", or "" for an unknown status.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl Query for GetJobStatus {
    type Output = JobStatusView;
}

pub struct GetContainerById {
    pub id: Uuid,
}

impl Query for GetContainerById {
    type Output = Container;
}

/// List containers, capped at `limit`.
pub struct ListContainers {
    pub limit: i64,
}

impl Default for ListContainers {
    fn default() -> Self {
        Self { limit: 1000 }
    }
}

impl Query for ListContainers {
    type Output = Vec<Container>;
}
