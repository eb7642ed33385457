//! Connection manager: move Arrow tables in and out of PostgreSQL.

use std::fmt;
use std::str::FromStr;

use arrow_array::RecordBatch;
use arrow_schema::Schema;
use pgframe_arrow::{ColumnSpec, PgCell, arrow_type_to_pg, cell_at, rows_to_record_batch};
use sqlx::{Connection, Executor, PgConnection, Postgres, QueryBuilder, Statement};

use crate::config::DatabaseConfig;
use crate::pool::{Pool, create_pool};
use crate::{Error, Result};

/// PostgreSQL accepts at most this many bind parameters per statement.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// What `write_table` does when the target table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IfExists {
    /// Drop the table and recreate it with the new data.
    #[default]
    Replace,
    /// Insert into the existing table; create it when missing.
    Append,
    /// Refuse to write, leaving the existing table untouched.
    Fail,
}

impl IfExists {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for IfExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IfExists {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            "fail" => Ok(Self::Fail),
            other => Err(Error::config(format!(
                "invalid if_exists value {other:?}: expected replace, append or fail"
            ))),
        }
    }
}

/// Handle to one PostgreSQL database.
///
/// Owns a connection pool built from a [`DatabaseConfig`]. Construction does
/// no network I/O; connectivity problems surface on first use.
#[derive(Debug)]
pub struct DatabaseConnection {
    config: DatabaseConfig,
    pool: Pool,
}

impl DatabaseConnection {
    /// Build the pool for `config`'s database.
    ///
    /// Fails only on configuration problems such as an invalid port.
    pub fn new(config: DatabaseConfig) -> Result<Self> {
        let url = config.connection_url()?;
        let pool = create_pool(&url, config.pool_size().get(), config.acquire_timeout())?;
        Ok(Self { config, pool })
    }

    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Current pool occupancy.
    #[must_use]
    pub fn status(&self) -> deadpool::Status {
        self.pool.status()
    }

    /// Close the pool, dropping idle connections. Later operations fail.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Write `table` into `table_name`, returning the number of rows written.
    ///
    /// Column types follow the Arrow schema; no index column is written. DDL
    /// and inserts run in one transaction, so a failed write leaves the
    /// database as it was.
    pub async fn write_table(
        &self,
        table: &RecordBatch,
        table_name: &str,
        if_exists: IfExists,
    ) -> Result<u64> {
        validate_table_name(table_name)?;
        if table.num_columns() == 0 {
            return Err(Error::InvalidTable(format!(
                "cannot write {table_name}: table has no columns"
            )));
        }
        let create_sql = create_table_sql(table_name, &table.schema())?;

        let mut conn = self.pool.get().await?;
        let mut tx = conn.begin().await?;

        let exists = table_exists(&mut tx, table_name).await?;
        match (if_exists, exists) {
            (IfExists::Fail, true) => {
                return Err(Error::TableExists(table_name.to_owned()));
            }
            (IfExists::Replace, true) => {
                let drop_sql = format!("DROP TABLE {}", quote_ident(table_name));
                tracing::debug!(sql = %drop_sql, "Dropping table");
                (&mut *tx).execute(drop_sql.as_str()).await?;
                tracing::debug!(sql = %create_sql, "Creating table");
                (&mut *tx).execute(create_sql.as_str()).await?;
            }
            (IfExists::Append, true) => {}
            (_, false) => {
                tracing::debug!(sql = %create_sql, "Creating table");
                (&mut *tx).execute(create_sql.as_str()).await?;
            }
        }

        let written = insert_rows(&mut tx, table_name, table).await?;
        tx.commit().await?;

        tracing::info!(
            rows = written,
            if_exists = %if_exists,
            "Data successfully saved to table: {table_name}"
        );
        Ok(written)
    }

    /// Run `query` and collect every result row into one table.
    ///
    /// Column names and order follow the result set; an empty result still
    /// carries its columns. The query text is passed through unchanged.
    pub async fn read_table(&self, query: &str) -> Result<RecordBatch> {
        let mut conn = self.pool.get().await?;

        tracing::debug!(sql = query, "Executing query");
        let statement = (&mut *conn).prepare(query).await?;
        let specs = ColumnSpec::from_columns(statement.columns());
        // A cached plan goes stale once `write_table` replaces a table it
        // reads from, failing with SQLSTATE 0A000 on the next execution.
        conn.clear_cached_statements().await?;
        let specs = specs?;
        let rows = sqlx::query(query)
            .persistent(false)
            .fetch_all(&mut *conn)
            .await?;

        let batch = rows_to_record_batch(&specs, &rows)?;
        tracing::debug!(
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "Query finished"
        );
        Ok(batch)
    }

    /// Run `SELECT 1` on a pooled connection.
    ///
    /// Returns `false` on any failure, logging the reason; never errors.
    pub async fn test_connection(&self) -> bool {
        match self.ping().await {
            Ok(()) => {
                tracing::info!("Database connection successful");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database connection failed");
                false
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.get().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

/// Double-quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidTable("table name is empty".into()));
    }
    if name.contains('\0') {
        return Err(Error::InvalidTable(format!(
            "table name {name:?} contains a NUL byte"
        )));
    }
    Ok(())
}

/// `CREATE TABLE` statement matching an Arrow schema.
pub(crate) fn create_table_sql(table_name: &str, schema: &Schema) -> Result<String> {
    let columns = schema
        .fields()
        .iter()
        .map(|field| {
            let sql_type = arrow_type_to_pg(field.data_type())?;
            let not_null = if field.is_nullable() { "" } else { " NOT NULL" };
            Ok(format!("{} {sql_type}{not_null}", quote_ident(field.name())))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "CREATE TABLE {} ({})",
        quote_ident(table_name),
        columns.join(", ")
    ))
}

/// Rows per `INSERT` so that one statement stays under [`MAX_BIND_PARAMS`].
pub(crate) const fn rows_per_statement(num_columns: usize) -> usize {
    if num_columns == 0 {
        return MAX_BIND_PARAMS;
    }
    let rows = MAX_BIND_PARAMS / num_columns;
    if rows == 0 { 1 } else { rows }
}

async fn table_exists(conn: &mut PgConnection, table_name: &str) -> Result<bool> {
    // to_regclass resolves through search_path like the DDL and INSERT do
    let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
        .bind(quote_ident(table_name))
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

async fn insert_rows(conn: &mut PgConnection, table_name: &str, table: &RecordBatch) -> Result<u64> {
    let num_rows = table.num_rows();
    if num_rows == 0 {
        return Ok(0);
    }

    let schema = table.schema();
    let column_list = schema
        .fields()
        .iter()
        .map(|f| quote_ident(f.name()))
        .collect::<Vec<_>>()
        .join(", ");
    let prefix = format!("INSERT INTO {} ({column_list}) ", quote_ident(table_name));
    let chunk_size = rows_per_statement(table.num_columns());

    let mut written = 0;
    for start in (0..num_rows).step_by(chunk_size) {
        let end = (start + chunk_size).min(num_rows);
        let rows = (start..end)
            .map(|row| {
                table
                    .columns()
                    .iter()
                    .map(|column| cell_at(column.as_ref(), row))
                    .collect::<pgframe_arrow::Result<Vec<PgCell>>>()
            })
            .collect::<pgframe_arrow::Result<Vec<_>>>()?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(&prefix);
        builder.push_values(rows, |mut values, cells| {
            for cell in cells {
                cell.push_bind(&mut values);
            }
        });

        tracing::debug!(table = table_name, rows = end - start, "Inserting chunk");
        let result = builder.build().persistent(false).execute(&mut *conn).await?;
        written += result.rows_affected();
    }

    Ok(written)
}
