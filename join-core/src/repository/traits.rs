//! Repository Layer - Core Traits
//!
//! The document store is a JSON tree addressed by slash-separated paths.
//! Implementations can be remote (REST) or in-memory.

use async_trait::async_trait;
use serde_json::Value;

use super::StoreError;

/// Key-path JSON document store
///
/// Futures are `Send` on native targets; in the browser the fetch-backed
/// client is single-threaded, so the bound is dropped there.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DocumentStore {
    /// Read the value at `path`; `None` when nothing is stored there
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value at `path`
    async fn put(&self, path: &str, value: &Value) -> Result<(), StoreError>;

    /// Remove the value at `path`
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}
