use async_trait::async_trait;
use super::todo::{Todo, TodoId};

/// Storage for todos. The repository assigns ids on insert and owns all
/// persisted state; implementations must tolerate concurrent callers.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn insert(&self, title: &str, description: &str) -> anyhow::Result<TodoId>;
    async fn find_by_id(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    /// Overwrites every field of the row with `todo.id`. Returns `false` when no such row exists.
    async fn update(&self, todo: &Todo) -> anyhow::Result<bool>;
    async fn delete_by_id(&self, id: TodoId) -> anyhow::Result<bool>;
    /// All todos ordered by id, optionally restricted to one `done` state.
    async fn scan(&self, done: Option<bool>) -> anyhow::Result<Vec<Todo>>;
}
