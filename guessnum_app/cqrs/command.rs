use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::Result;

use crate::{config::Config, uow::UnitOfWork};

/// Marks a request that writes player state.
pub trait Command: Send + Sync {}

/// Runs one `Command` against the repositories of `uow`.
///
/// Handlers never commit or roll back; `AppBus::execute` does, based on the
/// returned result.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<()>;
}
