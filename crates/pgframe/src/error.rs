use pgframe_arrow::ArrowConversionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Table already exists: {0}")]
    TableExists(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ArrowConversionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Failure while talking to the database or moving data through it.
    #[must_use]
    pub const fn is_data_access(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Pool(_)
                | Self::TableExists(_)
                | Self::InvalidTable(_)
                | Self::Conversion(_)
        )
    }

    #[must_use]
    pub const fn is_table_exists(&self) -> bool {
        matches!(self, Self::TableExists(_))
    }

    #[must_use]
    pub const fn is_pool(&self) -> bool {
        matches!(self, Self::Pool(_))
    }

    /// SQLSTATE reported by the server, if the failure came from a statement.
    #[must_use]
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Database(sqlx::Error::Database(db)) => db.code().map(|code| code.into_owned()),
            _ => None,
        }
    }
}

impl From<deadpool::managed::PoolError<sqlx::Error>> for Error {
    fn from(err: deadpool::managed::PoolError<sqlx::Error>) -> Self {
        match err {
            deadpool::managed::PoolError::Backend(e) => Self::Database(e),
            other => Self::Pool(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
