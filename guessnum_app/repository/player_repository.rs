use uuid::Uuid;

use guessnum_types::errors::ApplicationError;
use guessnum_types::player::Player;

#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Inserts a new player. The stored revision is always 0.
    async fn create(&self, player: &Player) -> Result<(), ApplicationError>;

    /// Returns a player by id.
    async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError>;

    /// Returns a player by username.
    async fn get_by_username(&self, username: &str) -> Result<Player, ApplicationError>;

    /// Returns all players.
    async fn list_all(&self) -> Result<Vec<Player>, ApplicationError>;

    /// Returns the players sharing the lowest recorded best score.
    async fn list_best(&self) -> Result<Vec<Player>, ApplicationError>;

    /// Writes `player` only if the stored revision still equals `player.revision`.
    ///
    /// On success returns the stored record with its revision bumped by one.
    /// A stale revision yields `DbError::RevisionConflict` and leaves the
    /// stored record untouched.
    async fn persist(&self, player: &Player) -> Result<Player, ApplicationError>;

    /// Removes a player. Removing a missing player is not an error.
    async fn delete(&self, player_id: Uuid) -> Result<(), ApplicationError>;
}
