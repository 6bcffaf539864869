//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Nothing here talks to the network.

mod entity;
mod serde_util;
mod task;
mod contact;
mod user;
pub mod validation;

pub use entity::{Entity, DomainError, DomainResult, FieldError, FieldErrors, is_sample_id};
pub use task::{Category, Priority, Status, Subtask, Task, TaskDraft};
pub use contact::{initials_of, random_color, Contact, ContactDraft};
pub use user::{ActiveUser, SignupDraft, User, USER_COLOR};
