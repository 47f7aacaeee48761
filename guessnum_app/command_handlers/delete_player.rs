use std::sync::Arc;
use tracing::info;

use guessnum_types::Result;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::DeletePlayer},
    uow::UnitOfWork,
};

pub struct DeletePlayerCommandHandler {}

impl Default for DeletePlayerCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletePlayerCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<DeletePlayer> for DeletePlayerCommandHandler {
    async fn handle(
        &self,
        command: DeletePlayer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        uow.players().delete(command.player_id).await?;
        info!(player_id = %command.player_id, "Player deleted");
        Ok(())
    }
}
