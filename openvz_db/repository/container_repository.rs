use sqlx::{Postgres, Transaction, types::Json};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use openvz_app::repository::ContainerRepository;
use openvz_types::{
    Result,
    container::{Container, ContainerParameters},
    errors::{AppError, ApplicationError, DbError},
};

use crate::models as db_models;

/// Implements ContainerRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresContainerRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresContainerRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> ContainerRepository for PostgresContainerRepository<'a> {
    async fn add(&self, container: &Container) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query(
            r#"
            INSERT INTO containers (id, name, os_template, parameters, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(container.id)
        .bind(&container.name)
        .bind(&container.os_template)
        .bind(Json(&container.parameters))
        .bind(container.created_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                ApplicationError::App(AppError::DuplicateContainerName(container.name.clone()))
            } else {
                ApplicationError::Db(DbError::Database(e))
            }
        })?;

        Ok(())
    }

    async fn exists_with_name(&self, name: &str) -> Result<bool, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM containers WHERE name = $1)")
                .bind(name)
                .fetch_one(&mut *tx_guard.as_mut())
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(exists)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Container, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let container = sqlx::query_as::<_, db_models::Container>(
            r#"
            SELECT id, name, os_template, parameters, created_at
            FROM containers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or(ApplicationError::Db(DbError::ContainerNotFound(id)))?;

        Ok(container.into())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Container>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let containers = sqlx::query_as::<_, db_models::Container>(
            r#"
            SELECT id, name, os_template, parameters, created_at
            FROM containers
            ORDER BY created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(containers.into_iter().map(Into::into).collect())
    }

    async fn update_parameters(
        &self,
        id: Uuid,
        parameters: &ContainerParameters,
    ) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let result = sqlx::query("UPDATE containers SET parameters = $2 WHERE id = $1")
            .bind(id)
            .bind(Json(parameters))
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::ContainerNotFound(id)));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        sqlx::query("DELETE FROM containers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }
}
