//! Store Commands
//!
//! Frontend entry points to the document store, organized by domain.
//! Errors are flattened to strings for display.

use chrono::{Local, NaiveDate, Timelike};
use join_core::domain::{ContactDraft, SignupDraft, TaskDraft};
use join_core::services::{self, AuthService, ContactService, TaskService};
use join_core::{ActiveUser, Contact, DomainError, RestStore, Status, Task, User};

use crate::session;

thread_local! {
    static STORE: RestStore = RestStore::new(&session::store_config());
}

fn store() -> RestStore {
    STORE.with(|store| store.clone())
}

fn report(action: &str, err: DomainError) -> String {
    log::error!("[commands] {} failed: {}", action, err);
    err.to_string()
}

/// Local calendar date, used as the earliest allowed due date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_hour() -> u32 {
    Local::now().hour()
}

// ========================
// Auth Commands
// ========================

pub async fn login(email: &str, password: &str) -> Result<ActiveUser, String> {
    let store = store();
    AuthService::new(&store).login(email, password).await.map_err(|e| e.to_string())
}

pub fn guest() -> ActiveUser {
    let store = store();
    AuthService::new(&store).guest()
}

pub async fn is_email_registered(email: &str) -> Result<bool, String> {
    let store = store();
    AuthService::new(&store)
        .is_email_registered(email)
        .await
        .map_err(|e| report("email lookup", e))
}

pub async fn signup(draft: &SignupDraft) -> Result<User, String> {
    let store = store();
    AuthService::new(&store).signup(draft).await.map_err(|e| report("signup", e))
}

pub async fn refresh_session(active: &ActiveUser) -> Result<ActiveUser, String> {
    let store = store();
    AuthService::new(&store).refresh(active).await.map_err(|e| report("session refresh", e))
}

pub async fn reset_sample_data() -> Result<(), String> {
    let store = store();
    services::reset_sample_data(&store).await.map_err(|e| report("sample reset", e))
}

// ========================
// Task Commands
// ========================

pub async fn list_tasks(active: &ActiveUser) -> Result<Vec<Task>, String> {
    let store = store();
    TaskService::new(&store).list_for_user(active).await.map_err(|e| report("list tasks", e))
}

pub async fn create_task(draft: &TaskDraft, active: &mut ActiveUser) -> Result<Task, String> {
    let store = store();
    TaskService::new(&store)
        .create(draft, active, today())
        .await
        .map_err(|e| report("create task", e))
}

pub async fn edit_task(task_id: u32, draft: &TaskDraft, active: &ActiveUser) -> Result<Task, String> {
    let store = store();
    TaskService::new(&store)
        .edit(task_id, draft, active, today())
        .await
        .map_err(|e| report("edit task", e))
}

pub async fn delete_task(task_id: u32, active: &mut ActiveUser) -> Result<(), String> {
    let store = store();
    TaskService::new(&store).delete(task_id, active).await.map_err(|e| report("delete task", e))
}

pub async fn move_task(task_id: u32, status: Status) -> Result<Task, String> {
    let store = store();
    TaskService::new(&store)
        .move_to_status(task_id, status)
        .await
        .map_err(|e| report("move task", e))
}

pub async fn move_task_by_step(task_id: u32, direction: i32) -> Result<Task, String> {
    let store = store();
    TaskService::new(&store)
        .move_by_step(task_id, direction)
        .await
        .map_err(|e| report("move task", e))
}

pub async fn toggle_subtask(task_id: u32, sub_id: u32, done: bool) -> Result<Task, String> {
    let store = store();
    TaskService::new(&store)
        .toggle_subtask(task_id, sub_id, done)
        .await
        .map_err(|e| report("toggle subtask", e))
}

// ========================
// Contact Commands
// ========================

pub async fn list_contacts(active: &ActiveUser) -> Result<Vec<Contact>, String> {
    let store = store();
    ContactService::new(&store).list_for_user(active).await.map_err(|e| report("list contacts", e))
}

pub async fn own_contact(active: &ActiveUser) -> Result<Option<Contact>, String> {
    let store = store();
    ContactService::new(&store).own_contact(active).await.map_err(|e| report("own contact", e))
}

pub async fn create_contact(draft: &ContactDraft, active: &mut ActiveUser) -> Result<Contact, String> {
    let store = store();
    let mut rng = rand::thread_rng();
    ContactService::new(&store)
        .create(draft, active, &mut rng)
        .await
        .map_err(|e| report("create contact", e))
}

pub async fn edit_contact(contact_id: u32, draft: &ContactDraft, active: &mut ActiveUser) -> Result<Contact, String> {
    let store = store();
    ContactService::new(&store)
        .edit(contact_id, draft, active)
        .await
        .map_err(|e| report("edit contact", e))
}

pub async fn delete_contact(contact_id: u32, active: &mut ActiveUser) -> Result<(), String> {
    let store = store();
    ContactService::new(&store)
        .delete(contact_id, active)
        .await
        .map_err(|e| report("delete contact", e))
}
