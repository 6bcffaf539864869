//! Services Layer
//!
//! Operations the UI calls. Each service borrows a document store and
//! works on typed collections.

mod membership;
pub mod auth;
pub mod board;
pub mod contacts;
pub mod seed;
pub mod summary;
pub mod tasks;

pub use auth::AuthService;
pub use board::{assignee_badges, columns, nothing_found, recipients, AssigneeBadges, BoardColumn, Recipients, NO_TASK_FOUND};
pub use contacts::{group_by_initial, ContactService, OWN_CONTACT_ID};
pub use membership::Membership;
pub use seed::reset_sample_data;
pub use summary::{greeting, Summary};
pub use tasks::TaskService;
