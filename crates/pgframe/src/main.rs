use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pgframe::observability::init_logging;
use pgframe::{DatabaseConfig, DatabaseConnection, IfExists, io};

#[derive(Parser, Debug)]
#[command(name = "pgframe")]
#[command(about = "Move Arrow tables in and out of PostgreSQL", long_about = None)]
#[command(version)]
struct Args {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable JSON logging output
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the database accepts connections
    Check,

    /// Create the configured database if it does not exist
    Bootstrap,

    /// Run a query and print or save the result
    Query {
        /// SQL to execute
        sql: String,

        /// Write the result to an Arrow IPC file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an Arrow IPC or CSV file into a table
    Write {
        /// Target table name
        #[arg(short, long)]
        table: String,

        /// Input file (.arrow, .ipc, .feather or .csv)
        #[arg(short, long)]
        input: PathBuf,

        /// What to do when the table already exists (replace, append, fail)
        #[arg(long, default_value = "replace")]
        if_exists: IfExists,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // RUST_LOG may come from the env file, so load it before logging starts.
    let env_file = pgframe::load_env_file(args.env_file.as_deref())?;

    let level = if args.verbose { "debug" } else { "info" };
    init_logging(level, args.json_logs)?;
    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = DatabaseConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    match args.command {
        Command::Check => {
            let db = DatabaseConnection::new(config)?;
            if !db.test_connection().await {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Bootstrap => {
            if !pgframe::ensure_database_exists(&config).await? {
                tracing::info!("Database '{}' already exists", config.database());
            }
        }
        Command::Query { sql, output } => {
            let db = DatabaseConnection::new(config)?;
            let table = db.read_table(&sql).await?;
            match output {
                Some(path) => {
                    io::save_ipc(&table, &path)?;
                    tracing::info!(
                        rows = table.num_rows(),
                        "Query result saved to {}",
                        path.display()
                    );
                }
                None => println!("{}", io::pretty(&table)?),
            }
        }
        Command::Write {
            table,
            input,
            if_exists,
        } => {
            let data = io::load_table(&input)?;
            let db = DatabaseConnection::new(config)?;
            db.write_table(&data, &table, if_exists).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
