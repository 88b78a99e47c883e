use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use openvz_app::{jobs::Job, repository::JobRepository};
use openvz_types::{
    Result,
    errors::{ApplicationError, DbError},
};

use crate::models as db_models;

const JOB_COLUMNS: &str = "id, job_type, payload, status, locked_at, error_descr, entity_type, entity_id, created_at";

#[derive(Clone)]
pub struct PostgresJobRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresJobRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> JobRepository for PostgresJobRepository<'a> {
    async fn add(&self, job: &Job) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query(
            r#"
            INSERT INTO jobs (id, job_type, payload, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(job.id)
        .bind(&job.job_type)
        .bind(&job.payload)
        .bind(job.status.as_db_str())
        .bind(job.created_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }

    async fn get_by_id(&self, job_id: Uuid) -> Result<Job, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let job = sqlx::query_as::<_, db_models::Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(job_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or(ApplicationError::Db(DbError::JobNotFound(job_id)))?;

        Ok(job.into())
    }

    async fn find_claim_candidate(&self) -> Result<Option<Job>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let job = sqlx::query_as::<_, db_models::Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE status = 'Pending' AND locked_at IS NULL
            ORDER BY created_at
            LIMIT 1
            "#
        ))
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(job.map(Into::into))
    }

    async fn lock(&self, job_id: Uuid, locked_at: DateTime<Utc>) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query("UPDATE jobs SET locked_at = $2 WHERE id = $1")
            .bind(job_id)
            .bind(locked_at)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }

    async fn mark_as_done(
        &self,
        job_id: Uuid,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'Done', locked_at = NULL, entity_type = $2, entity_id = $3
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(entity_type)
        .bind(entity_id)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }

    async fn mark_as_failed(
        &self,
        job_id: Uuid,
        error_descr: &str,
    ) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'Failed', locked_at = NULL, error_descr = $2
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(error_descr)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }
}
