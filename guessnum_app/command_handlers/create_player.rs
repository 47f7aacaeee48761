use std::sync::Arc;
use tracing::info;

use guessnum_types::{Result, player::Player};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreatePlayer},
    uow::UnitOfWork,
};

pub struct CreatePlayerCommandHandler {}

impl Default for CreatePlayerCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatePlayerCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreatePlayer> for CreatePlayerCommandHandler {
    async fn handle(
        &self,
        command: CreatePlayer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        let player = Player::new(command.id, command.username, command.best_score);
        player.validate()?;

        uow.players().create(&player).await?;
        info!(player_id = %player.id, username = %player.username, "Player created");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use guessnum_types::{
        Result,
        errors::{AppError, ApplicationError, DbError},
    };

    use super::*;
    use crate::{config::Config, test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_create_player_handler_success() -> Result<()> {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let handler = CreatePlayerCommandHandler::new();

        let command = CreatePlayer {
            id: Uuid::new_v4(),
            username: "ivan".to_string(),
            best_score: None,
        };

        handler.handle(command.clone(), &mock_uow, &config).await?;

        let saved_player = mock_uow.players().get_by_id(command.id).await?;
        assert_eq!(saved_player.id, command.id);
        assert_eq!(saved_player.username, command.username);
        assert_eq!(saved_player.best_score, None);
        assert_eq!(saved_player.revision, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_player_duplicate_username() {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let handler = CreatePlayerCommandHandler::new();

        let first = CreatePlayer {
            id: Uuid::new_v4(),
            username: "ivan".to_string(),
            best_score: Some(4),
        };
        handler.handle(first, &mock_uow, &config).await.unwrap();

        let second = CreatePlayer {
            id: Uuid::new_v4(),
            username: "ivan".to_string(),
            best_score: None,
        };
        let result = handler.handle(second, &mock_uow, &config).await;

        match result {
            Err(ApplicationError::Db(DbError::UsernameTaken(username))) => {
                assert_eq!(username, "ivan")
            }
            other => panic!("Expected UsernameTaken error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_player_blank_username() {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let config = Arc::new(Config::default());
        let handler = CreatePlayerCommandHandler::new();

        let command = CreatePlayer {
            id: Uuid::new_v4(),
            username: " ".to_string(),
            best_score: None,
        };
        let result = handler.handle(command.clone(), &mock_uow, &config).await;

        assert!(matches!(
            result,
            Err(ApplicationError::App(AppError::InvalidUsername))
        ));
        assert!(mock_uow.players().get_by_id(command.id).await.is_err());
    }
}
