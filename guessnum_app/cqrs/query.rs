use async_trait::async_trait;
use std::sync::Arc;

use guessnum_types::Result;

use crate::{config::Config, uow::UnitOfWork};

/// A read-only request producing `Output`.
pub trait Query: Send + Sync {
    type Output: Send + Sync;
}

/// Answers a `Query`; the bus rolls the unit of work back afterwards.
#[async_trait]
pub trait QueryHandler<Q: Query> {
    async fn handle(
        &self,
        query: Q,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Q::Output>;
}
