//! Domain Layer - Core Entity Trait
//!
//! Every record kept in the document store lives in a named collection
//! at index `id - 1`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// Ids 1..=10 are the shared sample records every account starts with
const SAMPLE_IDS: std::ops::RangeInclusive<u32> = 1..=10;

/// Whether an id belongs to the shared sample data
pub fn is_sample_id(id: u32) -> bool {
    SAMPLE_IDS.contains(&id)
}

/// Core trait for all stored records
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Top-level collection name in the store
    const COLLECTION: &'static str;

    /// Returns the record's id (1-based)
    fn id(&self) -> u32;

    /// Assigns the id chosen at creation time
    fn set_id(&mut self, id: u32);
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{}", .0.messages().join(" "))]
    Validation(FieldErrors),
    #[error("Check your email and password. Please try again.")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A validation message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered collection of validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Whether any message targets the given field
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// First message for the given field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    /// Ok when empty, otherwise a validation error
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl DomainError {
    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            DomainError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids() {
        assert!(is_sample_id(1));
        assert!(is_sample_id(10));
        assert!(!is_sample_id(0));
        assert!(!is_sample_id(11));
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.push("email", "Enter a valid e-mail address.");
        errors.push("name", "Enter a name of at least 3 letters.");
        let err = errors.into_result().unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.has("email"));
        assert_eq!(fields.first("name"), Some("Enter a name of at least 3 letters."));
        assert_eq!(
            err.to_string(),
            "Enter a valid e-mail address. Enter a name of at least 3 letters."
        );
    }
}
