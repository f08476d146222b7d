use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        prepare_parent_dir(database_url)?;
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url {database_url}"))?
            .create_if_missing(true);
        // Every connection to `sqlite::memory:` opens its own database, so an
        // in-memory pool must keep exactly one connection alive.
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None::<Duration>).max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                done INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, title: &str, description: &str) -> Result<TodoId> {
        let result = sqlx::query("INSERT INTO todos (title, description, done) VALUES (?1, ?2, 0)")
            .bind(title)
            .bind(description)
            .execute(&*self.pool)
            .await?;
        Ok(TodoId(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query("SELECT id, title, description, done FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn update(&self, todo: &Todo) -> Result<bool> {
        let result = sqlx::query("UPDATE todos SET title = ?2, description = ?3, done = ?4 WHERE id = ?1")
            .bind(todo.id.0)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.done)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self, done: Option<bool>) -> Result<Vec<Todo>> {
        let rows = match done {
            None => {
                sqlx::query("SELECT id, title, description, done FROM todos ORDER BY id")
                    .fetch_all(&*self.pool)
                    .await?
            }
            Some(done) => {
                sqlx::query("SELECT id, title, description, done FROM todos WHERE done = ?1 ORDER BY id")
                    .bind(done)
                    .fetch_all(&*self.pool)
                    .await?
            }
        };
        rows.into_iter().map(row_to_todo).collect()
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        done: row.try_get("done")?,
    })
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn prepare_parent_dir(database_url: &str) -> Result<()> {
    if is_memory_url(database_url) { return Ok(()); }
    let Some(rest) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or(rest);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
