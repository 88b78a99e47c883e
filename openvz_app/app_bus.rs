use std::sync::Arc;

use openvz_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    uow::UnitOfWorkProvider,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all API-facing logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self {
            config,
            uow_provider,
        }
    }

    /// Executes a command.
    /// - It begins a Unit of Work.
    /// - It passes the UoW to the handler.
    /// - If the handler succeeds, it commits the UoW.
    /// - If the handler fails, it rolls back the UoW.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<(), ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.uow_provider.begin().await?;

        match handler.handle(cmd, &uow, &self.config).await {
            Ok(_) => {
                uow.commit().await?;
                Ok(())
            }
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query should *never* modify the state, so the UoW is always rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.uow_provider.begin().await?;

        let result = handler.handle(query, &uow, &self.config).await;

        uow.rollback().await?;

        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        command_handlers::AddContainerCommandHandler,
        cqrs::{commands::AddContainer, queries::GetJobStatus},
        queries_handlers::GetJobStatusHandler,
        test_utils::tests::MockUnitOfWorkProvider,
    };

    #[tokio::test]
    async fn test_execute_commits_on_success() {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let bus = AppBus::new(Arc::new(Config::default()), provider.clone());

        let command = AddContainer::new("web1".to_string(), "ubuntu20".to_string());
        let job_id = command.job_id;
        bus.execute(command, AddContainerCommandHandler::new())
            .await
            .unwrap();

        assert_eq!(provider.commits(), 1);
        assert_eq!(provider.rollbacks(), 0);

        let view = bus
            .query(GetJobStatus { id: job_id }, GetJobStatusHandler::new())
            .await
            .unwrap();
        assert_eq!(view.status, "pending");
        assert_eq!(provider.rollbacks(), 1, "queries always roll back");
    }

    #[tokio::test]
    async fn test_execute_rolls_back_on_failure() {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let bus = AppBus::new(Arc::new(Config::default()), provider.clone());

        let command = AddContainer::new(String::new(), "ubuntu20".to_string());
        let result = bus.execute(command, AddContainerCommandHandler::new()).await;

        assert!(result.is_err());
        assert_eq!(provider.commits(), 0);
        assert_eq!(provider.rollbacks(), 1);
    }
}
