use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListBestPlayers},
    uow::UnitOfWork,
};

pub struct ListBestPlayersHandler {}

impl ListBestPlayersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListBestPlayers> for ListBestPlayersHandler {
    async fn handle(
        &self,
        _query: ListBestPlayers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListBestPlayers as Query>::Output, ApplicationError> {
        uow.players().list_best().await
    }
}
