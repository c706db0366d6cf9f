use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::KvStore;

/// Process-local store, used by default and as the test fake
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, JsonValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        tracing::debug!("Stored key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.entries.write().await.remove(key).is_some() {
            tracing::debug!("Deleted key: {}", key);
        }
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, JsonValue)>> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
