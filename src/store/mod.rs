pub mod memory;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

/// Key-value persistence addressed by opaque string keys
///
/// Durability and consistency are the implementation's concern. Writes to
/// the same key are last-write-wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent
    async fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    /// Insert or overwrite the value stored under `key`
    async fn set(&self, key: &str, value: JsonValue) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// All entries whose key starts with `prefix`, ordered by key
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, JsonValue)>>;

    /// Verify the store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Open the store selected by the configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn KvStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Spanner => {
            let spanner_config = config
                .spanner
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("Spanner backend selected without Spanner settings"))?;
            Ok(Arc::new(SpannerStore::from_config(spanner_config).await?))
        }
    }
}
