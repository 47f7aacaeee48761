use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use guessnum_app::repository::PlayerRepository;
use guessnum_types::{
    Result,
    errors::{AppError, ApplicationError, DbError},
    player::Player,
};

use crate::models::{self as db_models};

const PLAYER_COLUMNS: &str = "id, username, best_score, revision";

/// Implements PlayerRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresPlayerRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresPlayerRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

/// Maps a unique violation on `username` to `UsernameTaken`.
fn write_error(e: sqlx::Error, username: &str) -> ApplicationError {
    let unique_violation = matches!(
        &e,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation()
    );
    if unique_violation {
        return ApplicationError::Db(DbError::UsernameTaken(username.to_string()));
    }
    ApplicationError::Db(DbError::Database(e))
}

/// Converts a score to its INTEGER column value; never wraps negative.
fn score_column(best_score: Option<u32>) -> Result<Option<i32>, ApplicationError> {
    best_score
        .map(|score| i32::try_from(score).map_err(|_| AppError::InvalidBestScore(score).into()))
        .transpose()
}

#[async_trait::async_trait]
impl<'a> PlayerRepository for PostgresPlayerRepository<'a> {
    async fn create(&self, player: &Player) -> Result<(), ApplicationError> {
        let best_score = score_column(player.best_score)?;
        let mut tx_guard = self.tx.lock().await;

        sqlx::query(
            r#"
              INSERT INTO players (id, username, best_score, revision)
              VALUES ($1, $2, $3, 0)
              "#,
        )
        .bind(player.id)
        .bind(&player.username)
        .bind(best_score)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| write_error(e, &player.username))?;

        Ok(())
    }

    async fn get_by_id(&self, player_id: Uuid) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let player = sqlx::query_as::<_, db_models::Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1"
        ))
        .bind(player_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or(ApplicationError::Db(DbError::PlayerNotFound(player_id)))?;

        Ok(player.into())
    }

    async fn get_by_username(&self, username: &str) -> Result<Player, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let player = sqlx::query_as::<_, db_models::Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?
        .ok_or_else(|| {
            ApplicationError::Db(DbError::PlayerByUsernameNotFound(username.to_string()))
        })?;

        Ok(player.into())
    }

    async fn list_all(&self) -> Result<Vec<Player>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let players = sqlx::query_as::<_, db_models::Player>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY username"
        ))
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(players.into_iter().map(Into::into).collect())
    }

    async fn list_best(&self) -> Result<Vec<Player>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let players = sqlx::query_as::<_, db_models::Player>(&format!(
            r#"
            SELECT {PLAYER_COLUMNS} FROM players
            WHERE best_score = (SELECT MIN(best_score) FROM players)
            ORDER BY username
            "#
        ))
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(players.into_iter().map(Into::into).collect())
    }

    async fn persist(&self, player: &Player) -> Result<Player, ApplicationError> {
        let best_score = score_column(player.best_score)?;
        let mut tx_guard = self.tx.lock().await;

        // Check-and-write in one statement: zero rows means the revision moved
        // (or the row is gone) since it was read.
        let saved = sqlx::query_as::<_, db_models::Player>(&format!(
            r#"
            UPDATE players
            SET username = $2, best_score = $3, revision = revision + 1
            WHERE id = $1 AND revision = $4
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(player.id)
        .bind(&player.username)
        .bind(best_score)
        .bind(player.revision as i32)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| write_error(e, &player.username))?
        .ok_or(ApplicationError::Db(DbError::RevisionConflict {
            player_id: player.id,
            revision: player.revision,
        }))?;

        Ok(saved.into())
    }

    async fn delete(&self, player_id: Uuid) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(())
    }
}
