//! Store-level errors

use thiserror::Error;

/// Failures talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request for '{path}' failed: {message}")]
    Transport { path: String, message: String },
    #[error("HTTP error! status: {status} ({path})")]
    Status { path: String, status: u16 },
    #[error("invalid data at '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
