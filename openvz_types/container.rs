use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Free-form container settings, forwarded as-is to the commander
/// (e.g. `{"cpus": "2", "ram": "1G"}`).
pub type ContainerParameters = HashMap<String, String>;

/// A container that has been materialized by a successful `add-container` job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "ostemplate")]
    pub os_template: String,
    pub parameters: ContainerParameters,
    pub created_at: DateTime<Utc>,
}

impl Container {
    pub fn new(id: Uuid, name: String, os_template: String) -> Self {
        Self {
            id,
            name,
            os_template,
            parameters: ContainerParameters::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_serializes_template_as_ostemplate() {
        let container = Container::new(Uuid::new_v4(), "web1".into(), "ubuntu20".into());
        let value = serde_json::to_value(&container).unwrap();

        assert_eq!(value["name"], "web1");
        assert_eq!(value["ostemplate"], "ubuntu20");
        assert!(value.get("os_template").is_none());
        assert!(value["parameters"].as_object().unwrap().is_empty());
    }
}
