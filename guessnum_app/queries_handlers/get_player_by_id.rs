use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetPlayerById},
    uow::UnitOfWork,
};

pub struct GetPlayerByIdHandler {}

impl GetPlayerByIdHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPlayerById> for GetPlayerByIdHandler {
    async fn handle(
        &self,
        query: GetPlayerById,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetPlayerById as Query>::Output, ApplicationError> {
        let repo = uow.players();
        repo.get_by_id(query.player_id).await
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use guessnum_types::{
        errors::DbError,
        test_utils::{PlayerFactoryOptions, player_factory},
    };

    use super::*;
    use crate::test_utils::tests::{MockPlayerRepository, MockUnitOfWork};

    #[tokio::test]
    async fn test_get_player_by_id() {
        let repo = MockPlayerRepository::new();
        let player = player_factory(PlayerFactoryOptions {
            best_score: Some(6),
            revision: Some(2),
            ..Default::default()
        });
        repo.insert(player.clone());

        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::with_players(repo));
        let config = Arc::new(Config::default());

        let found = GetPlayerByIdHandler::new()
            .handle(
                GetPlayerById {
                    player_id: player.id,
                },
                &uow,
                &config,
            )
            .await
            .unwrap();

        assert_eq!(found, player);
    }

    #[tokio::test]
    async fn test_get_missing_player_by_id() {
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let missing = Uuid::new_v4();

        let result = GetPlayerByIdHandler::new()
            .handle(GetPlayerById { player_id: missing }, &uow, &config)
            .await;

        match result {
            Err(ApplicationError::Db(DbError::PlayerNotFound(id))) => assert_eq!(id, missing),
            other => panic!("Expected PlayerNotFound, got: {:?}", other),
        }
    }
}
