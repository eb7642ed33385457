//! One-time setup: create the configured database when it is missing.

use sqlx::Executor;

use crate::config::DatabaseConfig;
use crate::connection::quote_ident;
use crate::pool::{Pool, create_pool};
use crate::{Error, Result};

/// SQLSTATE for `duplicate_database`.
const DUPLICATE_DATABASE: &str = "42P04";

/// Create `config.database()` on the server unless it already exists.
///
/// Connects to the `postgres` maintenance database with the same host, port
/// and credentials. Returns `true` when the database was created and `false`
/// when it was already present, including when a concurrent caller created it
/// first.
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<bool> {
    let database = config.database();
    if database.is_empty() {
        return Err(Error::config("database name is empty"));
    }

    let url = config.maintenance_url()?;
    let pool = create_pool(&url, 1, config.acquire_timeout())?;
    let result = create_if_missing(&pool, database).await;
    pool.close();
    result
}

async fn create_if_missing(pool: &Pool, database: &str) -> Result<bool> {
    let mut conn = pool.get().await?;

    let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(database)
        .fetch_optional(&mut *conn)
        .await?;
    if found.is_some() {
        tracing::debug!(database, "Database already exists");
        return Ok(false);
    }

    // CREATE DATABASE cannot run inside a transaction block; send it as a
    // simple query.
    let sql = format!("CREATE DATABASE {}", quote_ident(database));
    match (&mut *conn).execute(sql.as_str()).await {
        Ok(_) => {
            tracing::info!("Database '{database}' created.");
            Ok(true)
        }
        Err(e) if is_duplicate_database(&e) => {
            tracing::debug!(database, "Database created concurrently");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn is_duplicate_database(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(DUPLICATE_DATABASE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;

    #[test]
    fn test_is_duplicate_database_non_database_errors() {
        assert!(!is_duplicate_database(&sqlx::Error::RowNotFound));
        assert!(!is_duplicate_database(&sqlx::Error::PoolTimedOut));
    }

    #[tokio::test]
    async fn test_empty_database_name() {
        let config = ConfigBuilder::new()
            .user("u")
            .password("p")
            .database("")
            .build()
            .unwrap();
        let err = ensure_database_exists(&config).await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_data_access_error() {
        let config = ConfigBuilder::new()
            .user("u")
            .password("p")
            .host("127.0.0.1")
            .port("1")
            .build()
            .unwrap();
        let err = ensure_database_exists(&config).await.unwrap_err();
        assert!(err.is_data_access());
    }
}
