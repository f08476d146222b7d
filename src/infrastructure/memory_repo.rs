use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

#[derive(Default)]
struct Store {
    next_id: i64,
    items: BTreeMap<TodoId, Todo>,
}

/// Process-local repository. Ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn init(&self) -> Result<()> { Ok(()) }

    async fn insert(&self, title: &str, description: &str) -> Result<TodoId> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let id = TodoId(store.next_id);
        store.items.insert(id, Todo { id, title: title.to_string(), description: description.to_string(), done: false });
        Ok(id)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.store.read().await.items.get(&id).cloned())
    }

    async fn update(&self, todo: &Todo) -> Result<bool> {
        let mut store = self.store.write().await;
        let Some(slot) = store.items.get_mut(&todo.id) else { return Ok(false) };
        *slot = todo.clone();
        Ok(true)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<bool> {
        Ok(self.store.write().await.items.remove(&id).is_some())
    }

    async fn scan(&self, done: Option<bool>) -> Result<Vec<Todo>> {
        let store = self.store.read().await;
        Ok(store.items.values().filter(|t| done.is_none_or(|d| t.done == d)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = InMemoryTodoRepository::new();
        let a = repo.insert("a", "").await.unwrap();
        let b = repo.insert("b", "").await.unwrap();
        assert_eq!((a, b), (TodoId(1), TodoId(2)));
        assert!(repo.delete_by_id(b).await.unwrap());
        let c = repo.insert("c", "").await.unwrap();
        assert_eq!(c, TodoId(3));
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = InMemoryTodoRepository::new();
        let ghost = Todo { id: TodoId(42), title: "x".into(), description: String::new(), done: false };
        assert!(!repo.update(&ghost).await.unwrap());
        assert!(!repo.delete_by_id(TodoId(42)).await.unwrap());
        assert!(repo.find_by_id(TodoId(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scan_filters_by_done_in_id_order() {
        let repo = InMemoryTodoRepository::new();
        for title in ["one", "two", "three"] {
            repo.insert(title, "").await.unwrap();
        }
        let mut two = repo.find_by_id(TodoId(2)).await.unwrap().unwrap();
        two.done = true;
        assert!(repo.update(&two).await.unwrap());

        let titles = |todos: Vec<Todo>| todos.into_iter().map(|t| t.title).collect::<Vec<_>>();
        assert_eq!(titles(repo.scan(None).await.unwrap()), ["one", "two", "three"]);
        assert_eq!(titles(repo.scan(Some(true)).await.unwrap()), ["two"]);
        assert_eq!(titles(repo.scan(Some(false)).await.unwrap()), ["one", "three"]);
    }
}
