use async_trait::async_trait;
use std::sync::Arc;

use openvz_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListContainers},
    uow::UnitOfWork,
};

pub struct ListContainersHandler {}

impl ListContainersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListContainers> for ListContainersHandler {
    async fn handle(
        &self,
        query: ListContainers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListContainers as Query>::Output, ApplicationError> {
        let repo = uow.containers();
        repo.list(query.limit).await
    }
}
