//! Move Arrow tables in and out of PostgreSQL.
//!
//! Credentials come from `DB_*` environment variables (optionally seeded from
//! a `.env` file). A [`DatabaseConnection`] owns a connection pool and offers
//! `write_table`, `read_table` and `test_connection`;
//! [`ensure_database_exists`] creates the target database on first setup.
//!
//! ```rust,ignore
//! use pgframe::{DatabaseConfig, DatabaseConnection, IfExists, load_dotenv};
//!
//! load_dotenv()?;
//! let config = DatabaseConfig::from_env()?;
//! pgframe::ensure_database_exists(&config).await?;
//!
//! let db = DatabaseConnection::new(config)?;
//! db.write_table(&listings, "listings", IfExists::Replace).await?;
//! let cheap = db.read_table("SELECT * FROM listings WHERE price < 100").await?;
//! ```

pub mod blocking;
pub mod bootstrap;
pub mod config;
pub mod connection;
mod error;
pub mod io;
pub mod observability;
mod pool;

pub use bootstrap::ensure_database_exists;
pub use config::{ConfigBuilder, DatabaseConfig, load_dotenv, load_dotenv_from, load_env_file};
pub use connection::{DatabaseConnection, IfExists};
pub use error::{Error, Result};
pub use pool::{Pool, PooledConnection};
