//! In-memory document store
//!
//! Behaves like the remote store for the shapes the app relies on:
//! arrays are kept as index-keyed objects, writing `null` deletes,
//! and emptied parents disappear.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{DocumentStore, StoreError};

/// JSON tree held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: Mutex<Value>,
    offline: AtomicBool,
    /// Writes below this path prefix fail
    read_only: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `data` at the root
    pub fn with_data(data: Value) -> Self {
        Self {
            root: Mutex::new(normalize(data)),
            ..Self::default()
        }
    }

    /// Make every request fail with a transport error until switched back
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Reject writes at or below `prefix`; `None` lifts the restriction
    pub async fn fail_writes_under(&self, prefix: Option<&str>) {
        *self.read_only.lock().await = prefix.map(|p| p.trim_matches('/').to_string());
    }

    async fn check_writable(&self, path: &str) -> Result<(), StoreError> {
        self.check_online(path)?;
        if let Some(prefix) = self.read_only.lock().await.as_deref() {
            if path.trim_start_matches('/').starts_with(prefix) {
                return Err(StoreError::Status {
                    path: path.to_string(),
                    status: 401,
                });
            }
        }
        Ok(())
    }

    fn check_online(&self, path: &str) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Transport {
                path: path.to_string(),
                message: "store is offline".to_string(),
            });
        }
        Ok(())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Arrays become index-keyed objects; nulls and empty containers vanish
fn normalize(value: Value) -> Value {
    let map: Map<String, Value> = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), normalize(item)))
            .filter(|(_, item)| !item.is_null())
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, item)| (key, normalize(item)))
            .filter(|(_, item)| !item.is_null())
            .collect(),
        other => return other,
    };
    if map.is_empty() {
        Value::Null
    } else {
        Value::Object(map)
    }
}

fn lookup<'v>(node: &'v Value, segs: &[&str]) -> Option<&'v Value> {
    segs.iter().try_fold(node, |current, seg| current.get(*seg))
}

fn insert(node: &mut Value, segs: &[&str], value: Value) {
    let Some((head, rest)) = segs.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        insert(map.entry(head.to_string()).or_insert(Value::Null), rest, value);
    }
}

fn remove(node: &mut Value, segs: &[&str]) {
    let Some((head, rest)) = segs.split_first() else {
        *node = Value::Null;
        return;
    };
    if let Value::Object(map) = node {
        let emptied = match map.get_mut(*head) {
            Some(child) => {
                remove(child, rest);
                child.is_null()
            }
            None => false,
        };
        if emptied {
            map.remove(*head);
        }
        if map.is_empty() {
            *node = Value::Null;
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        self.check_online(path)?;
        let root = self.root.lock().await;
        Ok(lookup(&root, &segments(path)).filter(|v| !v.is_null()).cloned())
    }

    async fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        self.check_writable(path).await?;
        let value = normalize(value.clone());
        let segs = segments(path);
        let mut root = self.root.lock().await;
        if value.is_null() {
            remove(&mut root, &segs);
        } else {
            insert(&mut root, &segs, value);
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.check_writable(path).await?;
        let mut root = self.root.lock().await;
        remove(&mut root, &segments(path));
        Ok(())
    }
}
