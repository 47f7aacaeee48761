use std::sync::Arc;
use tracing::info;

use guessnum_app::{
    app::AppBus, config::Config, cqrs::queries::ListPlayers,
    queries_handlers::ListPlayersHandler,
};
use guessnum_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use guessnum_types::{Result, errors::ApplicationError};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let app_bus = setup_app().await?;

    let players = app_bus.query(ListPlayers, ListPlayersHandler::new()).await?;
    info!(players = players.len(), "Player store ready");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    info!("Shutting down");

    Ok(())
}

async fn setup_app() -> Result<AppBus, ApplicationError> {
    let config = Arc::new(Config::from_env());
    let policy = config.retry_policy();
    info!(
        max_attempts = policy.max_attempts(),
        backoff_ms = policy.backoff().as_millis() as u64,
        "Loaded player update retry policy"
    );

    let db_pool = establish_connection_pool().await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    Ok(AppBus::new(config, uow_provider))
}
