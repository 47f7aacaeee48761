mod cancel;
mod retry;

pub use cancel::{CancelHandle, CancelToken};
pub use retry::RetryPolicy;

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use guessnum_types::{
    Result,
    errors::{AppError, ApplicationError, DbError},
    player::Player,
};

use crate::{
    auth::authorize,
    cqrs::commands::UpdatePlayer,
    uow::{UnitOfWork, UnitOfWorkProvider},
};

/// Applies `UpdatePlayer` commands under optimistic concurrency control.
///
/// Every attempt runs in its own unit of work: fetch, authorize against the
/// fetched record, apply the change, persist. Only revision conflicts are
/// retried; they are turned into `AppError::PlayerNotUpdated` once the policy
/// runs out of attempts. Every other error is returned as-is.
pub struct PlayerMutator {
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    policy: RetryPolicy,
}

impl PlayerMutator {
    pub fn new(uow_provider: Arc<dyn UnitOfWorkProvider>, policy: RetryPolicy) -> Self {
        Self {
            uow_provider,
            policy,
        }
    }

    pub async fn update(&self, cmd: UpdatePlayer) -> Result<Player> {
        self.update_with_cancel(cmd, CancelToken::never()).await
    }

    #[instrument(skip_all, fields(
        player_id = %cmd.player_id,
        actor = ?cmd.actor.identity,
    ))]
    pub async fn update_with_cancel(
        &self,
        cmd: UpdatePlayer,
        mut cancel: CancelToken,
    ) -> Result<Player> {
        cmd.change.validate()?;

        let mut attempt = 1;
        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(cmd.player_id));
            }

            let conflict = match self.attempt(&cmd, attempt, &cancel).await {
                Ok(player) => {
                    info!(attempt, revision = player.revision, "Player updated");
                    return Ok(player);
                }
                Err(ApplicationError::Db(conflict @ DbError::RevisionConflict { .. })) => conflict,
                Err(e) => return Err(e),
            };

            if !self.policy.has_attempts_left(attempt) {
                error!(attempt, "Giving up on player update: {conflict}");
                return Err(AppError::PlayerNotUpdated {
                    player_id: cmd.player_id,
                    attempts: attempt,
                    source: Some(conflict),
                }
                .into());
            }

            warn!(attempt, "Revision conflict, retrying: {conflict}");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(cmd.player_id)),
                _ = tokio::time::sleep(self.policy.backoff()) => {}
            }
            attempt += 1;
        }
    }

    async fn attempt(
        &self,
        cmd: &UpdatePlayer,
        attempt: u32,
        cancel: &CancelToken,
    ) -> Result<Player> {
        let uow = self.uow_provider.begin().await?;

        match apply_once(&uow, cmd, attempt, cancel).await {
            Ok(player) => {
                uow.commit().await?;
                Ok(player)
            }
            Err(e) => {
                // The attempt's own error decides retry or failure.
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(attempt, "Rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }
}

async fn apply_once(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    cmd: &UpdatePlayer,
    attempt: u32,
    cancel: &CancelToken,
) -> Result<Player> {
    let players = uow.players();

    let current = players.get_by_id(cmd.player_id).await?;
    debug!(attempt, revision = current.revision, "Loaded player");

    // Always against the record just loaded: a concurrent rename must revoke
    // an owner's access on the next attempt.
    authorize(&cmd.actor, &current)?;

    let candidate = cmd.change.apply(&current);

    if cancel.is_cancelled() {
        return Err(cancelled(cmd.player_id));
    }

    players.persist(&candidate).await
}

fn cancelled(player_id: Uuid) -> ApplicationError {
    AppError::UpdateCancelled { player_id }.into()
}
