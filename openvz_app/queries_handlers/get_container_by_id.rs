use async_trait::async_trait;
use std::sync::Arc;

use openvz_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetContainerById},
    uow::UnitOfWork,
};

pub struct GetContainerByIdHandler {}

impl GetContainerByIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetContainerById> for GetContainerByIdHandler {
    async fn handle(
        &self,
        query: GetContainerById,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetContainerById as Query>::Output, ApplicationError> {
        let repo = uow.containers();
        repo.get_by_id(query.id).await
    }
}
