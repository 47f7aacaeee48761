use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use guessnum_app::{
    repository::PlayerRepository,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use guessnum_types::{
    Result,
    errors::{ApplicationError, DbError},
};

use crate::repository::PostgresPlayerRepository;

type SharedTx<'a> = Arc<Mutex<Transaction<'a, Postgres>>>;

/// Opens one Postgres transaction per unit of work.
#[derive(Debug, Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>> {
        let tx = self.pool.begin().await.map_err(DbError::Database)?;
        Ok(Box::new(PostgresUnitOfWork {
            tx: Arc::new(Mutex::new(tx)),
        }))
    }
}

/// Repositories from `players()` share the transaction and must be dropped
/// before `commit`.
#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork<'a> {
    tx: SharedTx<'a>,
}

impl<'a> PostgresUnitOfWork<'a> {
    fn into_transaction(self) -> Option<Transaction<'a, Postgres>> {
        Arc::try_unwrap(self.tx).ok().map(Mutex::into_inner)
    }
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for PostgresUnitOfWork<'a> {
    fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
        Arc::new(PostgresPlayerRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let tx = self.into_transaction().ok_or_else(|| {
            ApplicationError::Db(DbError::Transaction(
                "player repository still alive at commit".to_string(),
            ))
        })?;
        tx.commit().await.map_err(DbError::Database)?;
        Ok(())
    }

    /// A transaction still shared elsewhere rolls back when its last owner
    /// drops it.
    async fn rollback(self: Box<Self>) -> Result<()> {
        match self.into_transaction() {
            Some(tx) => Ok(tx.rollback().await.map_err(DbError::Database)?),
            None => Ok(()),
        }
    }
}
