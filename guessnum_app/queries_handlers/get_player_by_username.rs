use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetPlayerByUsername},
    uow::UnitOfWork,
};

pub struct GetPlayerByUsernameHandler {}

impl GetPlayerByUsernameHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPlayerByUsername> for GetPlayerByUsernameHandler {
    async fn handle(
        &self,
        query: GetPlayerByUsername,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetPlayerByUsername as Query>::Output, ApplicationError> {
        uow.players().get_by_username(&query.username).await
    }
}
