use thiserror::Error;
use uuid::Uuid;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Player with ID {0} not found")]
    PlayerNotFound(Uuid),

    #[error("Player with username '{0}' not found")]
    PlayerByUsernameNotFound(String),

    #[error("Player with ID {player_id} was modified concurrently (stale revision {revision})")]
    RevisionConflict { player_id: Uuid, revision: u32 },

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0} must be set")]
    MissingDatabaseUrl(&'static str),

    #[error("Transaction error: {0}")]
    Transaction(String),
}
