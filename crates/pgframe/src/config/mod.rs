//! Configuration management
//!
//! Settings come from `DB_*` environment variables, optionally seeded from a
//! `.env` file, or from [`ConfigBuilder`] directly.

mod builder;
mod env;

pub use builder::{ConfigBuilder, DatabaseConfig, MAINTENANCE_DATABASE};
pub use env::{load_dotenv, load_dotenv_from, load_env_file, load_from_env, vars};

use crate::Result;

impl DatabaseConfig {
    /// Read `DB_USER`, `DB_PASS`, `DB_HOST`, `DB_PORT`, `DB_NAME` and
    /// `DB_POOL_SIZE` from the process environment.
    ///
    /// Host, port and database default to `localhost`, `5432` and
    /// `airbnb_db`. Fails with a configuration error when user or password is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        load_from_env(ConfigBuilder::new())?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::env::tests::with_env_vars;
    use super::*;

    #[test]
    fn test_from_env() {
        with_env_vars(&[("DB_USER", "ana"), ("DB_PASS", "secret")], || {
            let config = DatabaseConfig::from_env().unwrap();
            assert_eq!(config.user(), "ana");
            assert_eq!(config.database(), "airbnb_db");
        });
    }

    #[test]
    fn test_from_env_missing_credentials() {
        with_env_vars(&[], || {
            assert!(DatabaseConfig::from_env().unwrap_err().is_config());
        });
    }
}
