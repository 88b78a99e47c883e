use chrono::{DateTime, Utc};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use openvz_types::container::ContainerParameters;

#[derive(Debug, Clone, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub job_type: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub locked_at: Option<DateTime<Utc>>,
    pub error_descr: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Container {
    pub id: Uuid,
    pub name: String,
    pub os_template: String,
    pub parameters: Option<Json<ContainerParameters>>,
    pub created_at: DateTime<Utc>,
}
