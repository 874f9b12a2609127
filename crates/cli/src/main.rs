use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use pg_ddl::{ast::table::TableDefinition, lexer::Lexer, parse_script};
use pg_storage::PgStorage;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "pgddl",
    version = "0.1.0",
    about = "PostgreSQL CREATE TABLE parser"
)]
struct Cli {
    /// Extra KEY=VALUE file loaded on top of the process environment
    #[arg(long, global = true)]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    match cli.command {
        Commands::Tokens { file } => {
            let source = tokio::fs::read_to_string(&file).await?;
            let tokens = Lexer::new().tokenize(&source)?;
            println!("{}", output::token_listing(&tokens));
        }
        Commands::Parse { file, output } => {
            let tables = load_script(&file).await?;
            let json = output::tables_json(&tables)?;
            output::emit(&json, output.as_deref().map(Path::new)).await?;
        }
        Commands::Check { file } => {
            let source = tokio::fs::read_to_string(&file).await?;
            match parse_script(&source) {
                Ok(tables) => {
                    info!(%file, statements = tables.len(), "Script is valid");
                    println!("ok");
                }
                Err(err) => {
                    eprintln!("{}", err.format_error(&source));
                    return Err(CliError::CheckFailed);
                }
            }
        }
        Commands::Render { file } => {
            let tables = load_script(&file).await?;
            println!("{}", output::rendered_script(&tables));
        }
        Commands::Apply { file, conn_str } => {
            let tables = load_script(&file).await?;
            let url = env.database_url(conn_str)?;

            let storage = PgStorage::connect(&url).await.inspect_err(|err| {
                error!(%err, "Could not connect to PostgreSQL");
            })?;
            storage.create_tables(&tables).await?;
            info!(%file, tables = tables.len(), "Applied script");
        }
    }

    Ok(())
}

async fn load_script(path: &str) -> Result<Vec<TableDefinition>, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let tables = parse_script(&source)?;
    info!(path, statements = tables.len(), "Parsed script");
    Ok(tables)
}
