//! Store Configuration
//!
//! Location of the remote document store.

use serde::{Deserialize, Serialize};

/// Project database used when nothing else is configured
const DEFAULT_BASE_URL: &str = "https://join-marcel-lukas-default-rtdb.europe-west1.firebasedatabase.app";

/// Remote store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    option_env!("JOIN_STORE_URL")
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Parse a JSON override, falling back to defaults for missing fields
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: StoreConfig = serde_json::from_str(raw)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}
