use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Todo, TodoInput};
use crate::store::KvStore;

/// Key prefix shared by every stored todo
pub const KEY_PREFIX: &str = "todo:";

fn key_for(id: Uuid) -> String {
    format!("{}{}", KEY_PREFIX, id)
}

fn decode(key: &str, value: JsonValue) -> Result<Todo> {
    serde_json::from_value(value).with_context(|| format!("Stored value under '{}' is not a todo", key))
}

/// Todo operations on top of a key-value store
///
/// Each todo lives under its own `todo:<id>` key; the collection is the set
/// of keys sharing that prefix.
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn KvStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Todo>> {
        self.store
            .scan_prefix(KEY_PREFIX)
            .await?
            .into_iter()
            .map(|(key, value)| decode(&key, value))
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Todo>> {
        let key = key_for(id);
        match self.store.get(&key).await? {
            Some(value) => decode(&key, value).map(Some),
            None => Ok(None),
        }
    }

    /// Store a new todo under a freshly generated id
    pub async fn create(&self, input: TodoInput) -> Result<Todo> {
        let todo = Todo::new(Uuid::new_v4(), input);
        self.put(&todo).await?;
        Ok(todo)
    }

    /// Replace the todo stored under `id`, or return `None` if there is none
    pub async fn update(&self, id: Uuid, input: TodoInput) -> Result<Option<Todo>> {
        if self.store.get(&key_for(id)).await?.is_none() {
            return Ok(None);
        }

        let todo = Todo::new(id, input);
        self.put(&todo).await?;
        Ok(Some(todo))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(&key_for(id)).await
    }

    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }

    async fn put(&self, todo: &Todo) -> Result<()> {
        let value = serde_json::to_value(todo).context("Failed to serialize todo")?;
        self.store.set(&key_for(todo.id), value).await
    }
}
