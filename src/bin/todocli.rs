use std::io::Write;

use anyhow::Result;
use clap::Parser;

use todoapp::application::todo_service::TodoServiceImpl;
use todoapp::cli::{self, Cli};
use todoapp::config::{Config, Storage};
use todoapp::domain::repository::TodoRepository;
use todoapp::infrastructure::{memory_repo::InMemoryTodoRepository, sqlite_repo::SqliteTodoRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::from_env()?;
    match config.storage {
        Storage::Memory => {
            tracing::warn!("using in-memory storage; changes are discarded when the command exits");
            execute(InMemoryTodoRepository::new(), args).await
        }
        Storage::Sqlite(url) => execute(SqliteTodoRepository::connect(&url).await?, args).await,
    }
}

async fn execute<R: TodoRepository>(repo: R, args: Cli) -> Result<()> {
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let mut stdout = std::io::stdout().lock();
    cli::run(&service, args.command, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}
