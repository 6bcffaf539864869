//! REST document store
//!
//! Talks to a Firebase-style realtime database: every path is a JSON
//! resource at `{base}/{path}.json`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response};
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::config::StoreConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP client for the remote store
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resource URL of a store path
    pub fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect();
        if encoded.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, encoded.join("/"))
        }
    }
}

fn transport(path: &str, err: reqwest::Error) -> StoreError {
    StoreError::Transport {
        path: path.to_string(),
        message: err.to_string(),
    }
}

fn check_status(path: &str, response: &Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        log::error!("[store] {} answered {}", path, status);
        Err(StoreError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DocumentStore for RestStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let url = self.url_for(path);
        log::debug!("[store] GET {}", url);
        let response = self.client.get(&url).send().await.map_err(|e| transport(path, e))?;
        check_status(path, &response)?;

        let body = response.text().await.map_err(|e| transport(path, e))?;
        let value: Value = serde_json::from_str(&body).map_err(|source| StoreError::Decode {
            path: path.to_string(),
            source,
        })?;
        Ok(if value.is_null() { None } else { Some(value) })
    }

    async fn put(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        let url = self.url_for(path);
        log::debug!("[store] PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(value)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        check_status(path, &response)
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let url = self.url_for(path);
        log::debug!("[store] DELETE {}", url);
        let response = self.client.delete(&url).send().await.map_err(|e| transport(path, e))?;
        check_status(path, &response)
    }
}
