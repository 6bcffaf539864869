//! Repository Layer
//!
//! Document store abstractions and implementations.

mod error;
mod traits;
mod collection;
mod memory;
mod rest;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use traits::DocumentStore;
pub use collection::{collection_values, Collection};
pub use memory::MemoryStore;
pub use rest::RestStore;
