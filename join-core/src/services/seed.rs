//! Bundled sample data
//!
//! Ten tutorial tasks and ten contacts shared by every account (ids 1..=10).

use crate::domain::{Contact, DomainError, DomainResult, Entity, Task};
use crate::repository::{Collection, DocumentStore};

const SAMPLE_TASKS: &str = include_str!("../../seed/tasks.json");
const SAMPLE_CONTACTS: &str = include_str!("../../seed/contacts.json");

fn parse<T: Entity>(raw: &str) -> DomainResult<Vec<T>> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::InvalidInput(format!("bundled {}: {}", T::COLLECTION, e)))
}

pub fn sample_tasks() -> DomainResult<Vec<Task>> {
    parse(SAMPLE_TASKS)
}

pub fn sample_contacts() -> DomainResult<Vec<Contact>> {
    parse(SAMPLE_CONTACTS)
}

/// Overwrite records 1..=10 of tasks and contacts with the bundled samples.
/// Records with higher ids are left alone.
pub async fn reset_sample_data<S>(store: &S) -> DomainResult<()>
where
    S: DocumentStore + ?Sized,
{
    let tasks = Collection::<Task, S>::new(store);
    for task in sample_tasks()? {
        tasks.save(&task).await?;
    }
    let contacts = Collection::<Contact, S>::new(store);
    for contact in sample_contacts()? {
        contacts.save(&contact).await?;
    }
    log::info!("[seed] sample tasks and contacts restored");
    Ok(())
}
