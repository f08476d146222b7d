use std::net::SocketAddr;

use todoapp::application::todo_service::TodoServiceImpl;
use todoapp::config::{Config, Storage};
use todoapp::domain::repository::TodoRepository;
use todoapp::http::routing::{self, todos};
use todoapp::infrastructure::{memory_repo::InMemoryTodoRepository, sqlite_repo::SqliteTodoRepository};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    match config.storage {
        Storage::Memory => {
            tracing::warn!("using in-memory storage; todos are lost on shutdown");
            serve(InMemoryTodoRepository::new(), config.addr).await
        }
        Storage::Sqlite(url) => serve(SqliteTodoRepository::connect(&url).await?, config.addr).await,
    }
}

async fn serve<R: TodoRepository + Clone>(repo: R, addr: SocketAddr) -> anyhow::Result<()> {
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }));

    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
