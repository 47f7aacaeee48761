use thiserror::Error;
use uuid::Uuid;

use super::DbError;

/// Errors for app logic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication is required to modify players")]
    Unauthenticated,

    #[error("'{identity}' is not allowed to modify player {player_id}")]
    Forbidden { identity: String, player_id: Uuid },

    #[error("Failed to update player with ID {player_id} after {attempts} attempts")]
    PlayerNotUpdated {
        player_id: Uuid,
        attempts: u32,
        #[source]
        source: Option<DbError>,
    },

    #[error("Update of player with ID {player_id} was cancelled")]
    UpdateCancelled { player_id: Uuid },

    #[error("Username is required")]
    InvalidUsername,

    #[error("Best score must be positive, got {0}")]
    InvalidBestScore(u32),
}
