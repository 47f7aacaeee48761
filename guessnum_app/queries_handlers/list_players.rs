use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListPlayers},
    uow::UnitOfWork,
};

pub struct ListPlayersHandler {}

impl ListPlayersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListPlayers> for ListPlayersHandler {
    async fn handle(
        &self,
        _query: ListPlayers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListPlayers as Query>::Output, ApplicationError> {
        uow.players().list_all().await
    }
}
