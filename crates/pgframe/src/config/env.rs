//! Environment variable loading for configuration

use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::builder::ConfigBuilder;
use crate::{Error, Result};

/// Environment variable names
pub mod vars {
    pub const DB_USER: &str = "DB_USER";
    pub const DB_PASS: &str = "DB_PASS";
    pub const DB_HOST: &str = "DB_HOST";
    pub const DB_PORT: &str = "DB_PORT";
    pub const DB_NAME: &str = "DB_NAME";
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
}

/// Load configuration from environment variables
///
/// Unset variables keep the builder's current value. A variable that is set
/// but empty is taken as-is.
pub fn load_from_env(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(user) = var(vars::DB_USER)? {
        builder = builder.user(user);
    }
    if let Some(password) = var(vars::DB_PASS)? {
        builder = builder.password(password);
    }
    if let Some(host) = var(vars::DB_HOST)? {
        builder = builder.host(host);
    }
    if let Some(port) = var(vars::DB_PORT)? {
        builder = builder.port(port);
    }
    if let Some(database) = var(vars::DB_NAME)? {
        builder = builder.database(database);
    }

    // Pool size
    if let Ok(size_str) = env::var(vars::DB_POOL_SIZE)
        && let Ok(size) = size_str.trim().parse::<usize>()
        && let Some(nz) = NonZeroUsize::new(size)
    {
        builder = builder.pool_size(nz);
    }

    Ok(builder)
}

/// Populate the process environment from `.env` in the current directory or
/// its parents.
///
/// Variables already set are never overridden. Returns the file that was
/// loaded, or `None` when there is no `.env` file.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::config(format!("failed to load .env: {e}"))),
    }
}

/// Populate the process environment from a specific file.
///
/// Variables already set are never overridden; a missing file is an error.
pub fn load_dotenv_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .map_err(|e| Error::config(format!("failed to load {}: {e}", path.display())))?;
    tracing::debug!("Loaded environment from {}", path.display());
    Ok(())
}

/// Load `path` when given, otherwise look for `.env` as [`load_dotenv`] does.
///
/// Call this before installing a subscriber so `RUST_LOG` from the file
/// takes effect. Returns the file that was loaded.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            load_dotenv_from(path)?;
            Ok(Some(path.to_path_buf()))
        }
        None => load_dotenv(),
    }
}

fn var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(Error::config(format!("{name} is not valid unicode")))
        }
    }
}
