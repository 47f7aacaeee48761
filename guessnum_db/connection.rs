use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use tracing::info;

use guessnum_types::errors::DbError;

pub type DbPool = PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn establish_connection_pool() -> Result<DbPool, DbError> {
    connect("DATABASE_URL").await
}

/// Same as `establish_connection_pool`, against `TEST_DATABASE_URL`.
pub async fn establish_test_connection_pool() -> Result<DbPool, DbError> {
    connect("TEST_DATABASE_URL").await
}

async fn connect(url_var: &'static str) -> Result<DbPool, DbError> {
    dotenvy::dotenv().ok();

    let url = env::var(url_var).map_err(|_| DbError::MissingDatabaseUrl(url_var))?;
    let max_connections = max_connections(env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref());
    info!(url_var, max_connections, "Connecting to Postgres");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&url)
        .await?;
    Ok(pool)
}

/// Pool size from `DATABASE_MAX_CONNECTIONS`; unset, unparsable or 0 falls
/// back to the default.
fn max_connections(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_connections_parsing() {
        assert_eq!(max_connections(None), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(max_connections(Some("12")), 12);
        assert_eq!(max_connections(Some(" 3 ")), 3);
        assert_eq!(max_connections(Some("0")), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(max_connections(Some("many")), DEFAULT_MAX_CONNECTIONS);
    }
}
