use std::sync::Arc;

use guessnum_types::{Result, errors::ApplicationError, player::Player};

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler, commands::UpdatePlayer},
    mutation::{CancelToken, PlayerMutator},
    uow::UnitOfWorkProvider,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
/// 3. Running player updates through the retrying `PlayerMutator`.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    mutator: PlayerMutator,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        let mutator = PlayerMutator::new(uow_provider.clone(), config.retry_policy());
        Self {
            config,
            uow_provider,
            mutator,
        }
    }

    /// Executes a command.
    /// A command is an operation that modifies the system state.
    /// This method manages the transaction:
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
    /// A query is an operation that reads system state and returns data.
    /// This method ensures the transaction is *always* rolled back.
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

    /// Replaces or patches a player, retrying on concurrent modifications.
    /// Each attempt gets its own Unit of Work.
    pub async fn update_player(&self, cmd: UpdatePlayer) -> Result<Player, ApplicationError> {
        self.mutator.update(cmd).await
    }

    pub async fn update_player_with_cancel(
        &self,
        cmd: UpdatePlayer,
        cancel: CancelToken,
    ) -> Result<Player, ApplicationError> {
        self.mutator.update_with_cancel(cmd, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use guessnum_types::{
        actor::Actor,
        errors::{AppError, DbError},
        player::PlayerChange,
    };

    use super::*;
    use crate::{
        command_handlers::CreatePlayerCommandHandler,
        cqrs::{commands::CreatePlayer, queries::ListPlayers},
        queries_handlers::ListPlayersHandler,
        test_utils::tests::{Interference, MockPlayerRepository, MockUnitOfWorkProvider},
    };

    fn setup(config: Config) -> (AppBus, MockUnitOfWorkProvider) {
        let provider = MockUnitOfWorkProvider::new(MockPlayerRepository::new());
        let bus = AppBus::new(Arc::new(config), Arc::new(provider.clone()));
        (bus, provider)
    }

    #[tokio::test]
    async fn test_execute_commits_and_query_rolls_back() {
        let (bus, provider) = setup(Config::default());

        bus.execute(
            CreatePlayer {
                id: Uuid::new_v4(),
                username: "ivan".to_string(),
                best_score: Some(8),
            },
            CreatePlayerCommandHandler::new(),
        )
        .await
        .unwrap();
        assert_eq!(provider.commit_count(), 1);

        let players = bus.query(ListPlayers, ListPlayersHandler::new()).await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].username, "ivan");
        assert_eq!(provider.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_rolls_back_on_failure() {
        let (bus, provider) = setup(Config::default());

        let result = bus
            .execute(
                CreatePlayer {
                    id: Uuid::new_v4(),
                    username: String::new(),
                    best_score: None,
                },
                CreatePlayerCommandHandler::new(),
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::InvalidUsername))
        ));
        assert_eq!(provider.commit_count(), 0);
        assert_eq!(provider.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_update_player_uses_configured_attempts() {
        let (bus, provider) = setup(Config {
            update_max_attempts: 2,
            update_backoff_ms: 0,
        });
        let id = Uuid::new_v4();
        bus.execute(
            CreatePlayer {
                id,
                username: "ivan".to_string(),
                best_score: Some(8),
            },
            CreatePlayerCommandHandler::new(),
        )
        .await
        .unwrap();

        let repo = provider.players();
        repo.interfere_after_fetch(vec![Some(Interference::Touch); 2]);

        let result = bus
            .update_player(UpdatePlayer {
                player_id: id,
                actor: Actor::user("ivan"),
                change: PlayerChange::patch_best_score(5),
            })
            .await;

        match result {
            Err(ApplicationError::App(AppError::PlayerNotUpdated {
                player_id,
                attempts,
                source,
            })) => {
                assert_eq!(player_id, id);
                assert_eq!(attempts, 2);
                assert!(matches!(source, Some(DbError::RevisionConflict { .. })));
            }
            other => panic!("Expected PlayerNotUpdated, got: {:?}", other),
        }
        assert_eq!(repo.persist_count(), 2);
    }
}
