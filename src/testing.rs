//! Helpers shared by handler tests

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, Router};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

use crate::app::build_router;
use crate::repository::TodoRepository;
use crate::state::AppState;
use crate::store::{KvStore, MemoryStore};

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<JsonValue>> {
        bail!("store unavailable")
    }

    async fn set(&self, _key: &str, _value: JsonValue) -> Result<()> {
        bail!("store unavailable")
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        bail!("store unavailable")
    }

    async fn scan_prefix(&self, _prefix: &str) -> Result<Vec<(String, JsonValue)>> {
        bail!("store unavailable")
    }

    async fn health_check(&self) -> Result<()> {
        bail!("store unavailable")
    }
}

pub fn app_with(store: Arc<dyn KvStore>) -> Router {
    build_router(AppState {
        todos: TodoRepository::new(store),
    })
}

pub fn memory_app() -> Router {
    app_with(Arc::new(MemoryStore::new()))
}

pub fn failing_app() -> Router {
    app_with(Arc::new(FailingStore))
}

/// Send a request with an optional raw JSON body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}
