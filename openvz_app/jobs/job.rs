use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// A durable record of deferred work, consumed by the job worker.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    /// Tag identifying the payload shape, e.g. "add-container".
    pub job_type: String,
    pub payload: Value,
    pub status: JobStatus,
    /// Set while a worker holds the job. There is no lease expiry.
    pub locked_at: Option<DateTime<Utc>>,
    pub error_descr: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: Uuid, job_type: &str, payload: Value) -> Self {
        Self {
            id,
            job_type: job_type.to_string(),
            payload,
            status: JobStatus::Pending,
            locked_at: None,
            error_descr: None,
            entity_type: None,
            entity_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Done,
    Failed,
    /// A stored value this build doesn't know about.
    Unknown(String),
}

impl JobStatus {
    /// Value persisted in the `jobs.status` column.
    pub fn as_db_str(&self) -> &str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Done => "Done",
            JobStatus::Failed => "Failed",
            JobStatus::Unknown(raw) => raw,
        }
    }

    /// Client-facing label. Unknown statuses render as an empty string.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
            JobStatus::Unknown(_) => "",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => JobStatus::Pending,
            "Done" => JobStatus::Done,
            "Failed" => JobStatus::Failed,
            _ => JobStatus::Unknown(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_new_is_pending_and_unlocked() {
        let id = Uuid::new_v4();
        let before_creation = Utc::now();
        let job = Job::new(id, "add-container", json!({"name": "web1"}));
        let after_creation = Utc::now();

        assert_eq!(job.id, id);
        assert_eq!(job.job_type, "add-container");
        assert_eq!(job.status, JobStatus::Pending);
        assert!(!job.is_locked());
        assert!(job.error_descr.is_none());
        assert!(job.entity_type.is_none());
        assert!(job.entity_id.is_none());
        assert!(job.created_at >= before_creation && job.created_at <= after_creation);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(JobStatus::Pending.label(), "pending");
        assert_eq!(JobStatus::Done.label(), "done");
        assert_eq!(JobStatus::Failed.label(), "failed");
        assert_eq!(JobStatus::Unknown("Archived".into()).label(), "");
    }

    #[test]
    fn test_status_from_db_value() {
        for status in [JobStatus::Pending, JobStatus::Done, JobStatus::Failed] {
            assert_eq!(JobStatus::from(status.as_db_str().to_string()), status);
        }
        assert_eq!(
            JobStatus::from("Processing".to_string()),
            JobStatus::Unknown("Processing".to_string())
        );
    }

    #[test]
    fn test_only_done_and_failed_are_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Unknown(String::new()).is_terminal());
    }
}
