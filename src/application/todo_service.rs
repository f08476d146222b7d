use crate::application::error::ServiceError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, TodoId};
use anyhow::Context;
use async_trait::async_trait;

/// Operations shared by every front end. This is the only place that decides
/// what a valid todo is and how `done` may change.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn get_all(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn get_pending(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn get_finished(&self) -> Result<Vec<Todo>, ServiceError>;
    async fn get(&self, id: TodoId) -> Result<Todo, ServiceError>;
    async fn add(&self, title: &str, description: &str) -> Result<Todo, ServiceError>;
    /// Stores `todo.title` and `todo.description`; `todo.done` is ignored.
    async fn edit(&self, todo: &Todo) -> Result<Todo, ServiceError>;
    async fn mark_as_done(&self, todo: &Todo) -> Result<Todo, ServiceError>;
    async fn delete(&self, todo: &Todo) -> Result<(), ServiceError>;
    /// Removes every finished todo and returns how many were removed.
    async fn delete_finished(&self) -> Result<usize, ServiceError>;

    /// `None` lists everything, `Some(true)` the finished todos, `Some(false)` the pending ones.
    async fn list(&self, done: Option<bool>) -> Result<Vec<Todo>, ServiceError> {
        match done {
            None => self.get_all().await,
            Some(true) => self.get_finished().await,
            Some(false) => self.get_pending().await,
        }
    }
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    async fn load(&self, id: TodoId) -> Result<Todo, ServiceError> {
        self.repo
            .find_by_id(id)
            .await
            .with_context(|| format!("loading todo {id}"))?
            .ok_or(ServiceError::NotFound(id))
    }

    async fn store(&self, todo: &Todo) -> Result<(), ServiceError> {
        let updated = self.repo.update(todo).await.with_context(|| format!("updating todo {}", todo.id))?;
        if updated { Ok(()) } else { Err(ServiceError::NotFound(todo.id)) }
    }

    async fn scan(&self, done: Option<bool>) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.repo.scan(done).await.context("listing todos")?)
    }
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.is_empty() { Err(ServiceError::InvalidInput) } else { Ok(()) }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn get_all(&self) -> Result<Vec<Todo>, ServiceError> { self.scan(None).await }
    async fn get_pending(&self) -> Result<Vec<Todo>, ServiceError> { self.scan(Some(false)).await }
    async fn get_finished(&self) -> Result<Vec<Todo>, ServiceError> { self.scan(Some(true)).await }
    async fn get(&self, id: TodoId) -> Result<Todo, ServiceError> { self.load(id).await }

    async fn add(&self, title: &str, description: &str) -> Result<Todo, ServiceError> {
        validate_title(title)?;
        let id = self.repo.insert(title, description).await.context("inserting todo")?;
        tracing::info!(%id, "todo created");
        Ok(Todo { id, title: title.to_string(), description: description.to_string(), done: false })
    }

    async fn edit(&self, todo: &Todo) -> Result<Todo, ServiceError> {
        validate_title(&todo.title)?;
        let mut stored = self.load(todo.id).await?;
        stored.title = todo.title.clone();
        stored.description = todo.description.clone();
        self.store(&stored).await?;
        tracing::info!(id = %stored.id, "todo edited");
        Ok(stored)
    }

    async fn mark_as_done(&self, todo: &Todo) -> Result<Todo, ServiceError> {
        let mut stored = self.load(todo.id).await?;
        if !stored.done {
            stored.done = true;
            self.store(&stored).await?;
            tracing::info!(id = %stored.id, "todo marked as done");
        }
        Ok(stored)
    }

    async fn delete(&self, todo: &Todo) -> Result<(), ServiceError> {
        let deleted = self.repo.delete_by_id(todo.id).await.with_context(|| format!("deleting todo {}", todo.id))?;
        if !deleted { return Err(ServiceError::NotFound(todo.id)); }
        tracing::info!(id = %todo.id, "todo deleted");
        Ok(())
    }

    async fn delete_finished(&self) -> Result<usize, ServiceError> {
        let finished = self.scan(Some(true)).await?;
        let mut deleted = 0;
        for todo in &finished {
            if self.repo.delete_by_id(todo.id).await.with_context(|| format!("deleting finished todo {}", todo.id))? {
                deleted += 1;
            }
        }
        tracing::info!(count = deleted, "finished todos deleted");
        Ok(deleted)
    }
}
