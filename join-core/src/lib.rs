//! Join Core
//!
//! Layered architecture:
//! - domain: Core entities, validation and business rules
//! - repository: Document store abstractions and implementations
//! - services: Task, contact, auth, board and summary operations
//! - config: Store location

pub mod config;
pub mod domain;
pub mod repository;
pub mod services;

pub use config::StoreConfig;
pub use domain::{
    ActiveUser, Category, Contact, DomainError, DomainResult, Entity, FieldErrors, Priority,
    Status, Subtask, Task, User,
};
pub use repository::{Collection, DocumentStore, MemoryStore, RestStore, StoreError};
pub use services::{AuthService, ContactService, Summary, TaskService};
