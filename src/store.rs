//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use join_core::{Contact, Task};
use leptos::prelude::*;
use reactive_stores::Store;

/// Data loaded for the signed-in user
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Tasks listed in the session
    pub tasks: Vec<Task>,
    /// Contacts listed in the session
    pub contacts: Vec<Contact>,
    /// The signed-in user rendered as a contact (absent for the guest)
    pub own_contact: Option<Contact>,
    /// Board search text
    pub search: String,
    /// Set while a load is in flight
    pub loading: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace a task in the store by ID
pub fn store_update_task(store: &AppStore, updated: Task) {
    if let Some(task) = store.tasks().write().iter_mut().find(|task| task.id == updated.id) {
        *task = updated;
    }
}

/// Remove a task from the store by ID
pub fn store_remove_task(store: &AppStore, task_id: u32) {
    store.tasks().write().retain(|task| task.id != task_id);
}

/// Insert or replace a contact, keeping the list sorted by name
pub fn store_upsert_contact(store: &AppStore, contact: Contact) {
    let field = store.contacts();
    let mut contacts = field.write();
    contacts.retain(|c| c.id != contact.id);
    contacts.push(contact);
    contacts.sort_by_key(|c| c.name.to_lowercase());
}

/// Remove a contact from the store by ID
pub fn store_remove_contact(store: &AppStore, contact_id: u32) {
    store.contacts().write().retain(|contact| contact.id != contact_id);
}

/// Forget everything loaded for the previous session
pub fn store_clear(store: &AppStore) {
    store.tasks().set(Vec::new());
    store.contacts().set(Vec::new());
    store.own_contact().set(None);
    store.search().set(String::new());
    store.loading().set(false);
}

/// Look up a loaded contact; id 0 is the signed-in user
pub fn find_contact(store: &AppStore, contact_id: u32) -> Option<Contact> {
    if contact_id == join_core::services::OWN_CONTACT_ID {
        return store.own_contact().get();
    }
    store.contacts().get().into_iter().find(|c| c.id == contact_id)
}
