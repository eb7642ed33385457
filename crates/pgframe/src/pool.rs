use std::str::FromStr;
use std::time::Duration;

use deadpool::Runtime;
use deadpool::managed::{self, Metrics, RecycleResult};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgConnection};
use url::Url;

use crate::{Error, Result};

pub type Pool = managed::Pool<ConnectionManager>;
pub type PooledConnection = managed::Object<ConnectionManager>;

#[derive(Debug)]
pub struct ConnectionManager {
    options: PgConnectOptions,
}

impl ConnectionManager {
    /// Parse connect options from a `postgres://` URL. No I/O.
    pub fn new(url: &Url) -> Result<Self> {
        let options = PgConnectOptions::from_str(url.as_str())
            .map_err(|e| Error::config(format!("invalid connection URL: {e}")))?;
        Ok(Self { options })
    }
}

impl managed::Manager for ConnectionManager {
    type Type = PgConnection;
    type Error = sqlx::Error;

    async fn create(&self) -> std::result::Result<PgConnection, sqlx::Error> {
        self.options.connect().await
    }

    async fn recycle(&self, conn: &mut PgConnection, _: &Metrics) -> RecycleResult<Self::Error> {
        conn.ping().await?;
        Ok(())
    }
}

/// Build a pool; connections are opened lazily on first checkout.
pub fn create_pool(url: &Url, max_size: usize, wait_timeout: Duration) -> Result<Pool> {
    Pool::builder(ConnectionManager::new(url)?)
        .max_size(max_size)
        .wait_timeout(Some(wait_timeout))
        .create_timeout(Some(Duration::from_secs(30)))
        .recycle_timeout(Some(Duration::from_secs(5)))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| Error::Pool(e.to_string()))
}
