//! Contact operations for the address book.

use std::collections::BTreeMap;

use rand::Rng;
use serde_json::Value;

use super::membership::{self, Membership};
use crate::domain::validation::validate_contact;
use crate::domain::{
    initials_of, is_sample_id, random_color, ActiveUser, Contact, ContactDraft, DomainError,
    DomainResult, Task, User,
};
use crate::repository::{Collection, DocumentStore};

/// Id under which the signed-in user shows up in their own address book
pub const OWN_CONTACT_ID: u32 = 0;

pub struct ContactService<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> ContactService<'a, S>
where
    S: DocumentStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn contacts(&self) -> Collection<'a, Contact, S> {
        Collection::new(self.store)
    }

    fn users(&self) -> Collection<'a, User, S> {
        Collection::new(self.store)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Contact>> {
        self.contacts().list().await
    }

    /// Contacts listed in the session, sorted by name
    pub async fn list_for_user(&self, active: &ActiveUser) -> DomainResult<Vec<Contact>> {
        let mut contacts = self.list_all().await?;
        contacts.retain(|contact| active.knows_contact(contact.id));
        contacts.sort_by_key(|contact| contact.name.to_lowercase());
        Ok(contacts)
    }

    /// The signed-in user as a contact entry; `None` for the guest
    pub async fn own_contact(&self, active: &ActiveUser) -> DomainResult<Option<Contact>> {
        if active.is_guest() {
            return Ok(None);
        }
        Ok(self.users().find_by_id(active.id).await?.map(|user| user.as_contact()))
    }

    /// A contact by id; id 0 is the signed-in user
    pub async fn get(&self, contact_id: u32, active: &ActiveUser) -> DomainResult<Contact> {
        if contact_id == OWN_CONTACT_ID {
            return self
                .own_contact(active)
                .await?
                .ok_or_else(|| DomainError::NotFound("own contact".to_string()));
        }
        self.contacts().get(contact_id).await
    }

    /// Validate and store a new contact with a random dark colour, then
    /// list it on the user record and in the session
    pub async fn create<R>(&self, draft: &ContactDraft, active: &mut ActiveUser, rng: &mut R) -> DomainResult<Contact>
    where
        R: Rng + ?Sized,
    {
        validate_contact(draft).into_result()?;
        let contact = Contact::new(
            0,
            draft.name.trim().to_string(),
            draft.email.trim().to_string(),
            draft.phone.trim().to_string(),
            random_color(rng),
        );
        let contact = self.contacts().create(contact).await?;

        if !active.is_guest() {
            membership::add_to_user(self.store, Membership::Contacts, active.id, contact.id).await?;
        }
        if !active.knows_contact(contact.id) {
            active.contacts.push(contact.id);
        }
        Ok(contact)
    }

    /// Update name, email and phone. Id 0 edits the signed-in user's own
    /// record and refreshes the session name.
    pub async fn edit(&self, contact_id: u32, draft: &ContactDraft, active: &mut ActiveUser) -> DomainResult<Contact> {
        validate_contact(draft).into_result()?;
        let name = draft.name.trim().to_string();
        let initials = initials_of(&name);

        if contact_id == OWN_CONTACT_ID {
            let mut user = self
                .users()
                .find_by_id(active.id)
                .await?
                .filter(|_| !active.is_guest())
                .ok_or_else(|| DomainError::NotFound("own contact".to_string()))?;
            user.name = name;
            user.initials = initials;
            user.email = draft.email.trim().to_string();
            user.phone = Some(draft.phone.trim().to_string());
            self.users().save(&user).await?;

            active.name = user.name.clone();
            active.initials = user.initials.clone();
            log::info!("[contacts] user {} edited their own entry", user.id);
            return Ok(user.as_contact());
        }

        let mut contact = self.contacts().get(contact_id).await?;
        contact.name = name;
        contact.initials = initials;
        contact.email = draft.email.trim().to_string();
        contact.phone = draft.phone.trim().to_string();
        self.contacts().save(&contact).await?;
        log::info!("[contacts] edited contact {}", contact_id);
        Ok(contact)
    }

    /// Delete a contact for the active user.
    ///
    /// Sample contacts are only detached from the active user's record,
    /// others are removed from the store and every user. In both cases the
    /// id is dropped from all task assignments and from the session.
    pub async fn delete(&self, contact_id: u32, active: &mut ActiveUser) -> DomainResult<()> {
        let detached = if is_sample_id(contact_id) {
            if active.is_guest() {
                Ok(())
            } else {
                membership::remove_from_user(self.store, Membership::Contacts, active.id, contact_id).await
            }
        } else {
            match self.contacts().remove(contact_id).await {
                Ok(()) if active.is_guest() => Ok(()),
                Ok(()) => membership::remove_from_all_users(self.store, Membership::Contacts, contact_id).await,
                Err(e) => Err(e),
            }
        };
        if let Err(e) = &detached {
            log::error!("[contacts] detaching contact {} failed: {}", contact_id, e);
        }

        let unassigned = self.unassign_everywhere(contact_id).await;
        active.contacts.retain(|id| *id != contact_id);
        detached.and(unassigned)
    }

    async fn unassign_everywhere(&self, contact_id: u32) -> DomainResult<()> {
        let tasks = Collection::<Task, S>::new(self.store);
        let mut first_error = None;
        for mut task in tasks.list().await? {
            if !task.unassign(contact_id) {
                continue;
            }
            let assigned = Value::from(task.assigned.clone());
            if let Err(e) = tasks.write_field(task.id, "assigned", &assigned).await {
                log::error!("[contacts] could not unassign {} from task {}: {}", contact_id, task.id, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Contacts grouped by their first initial, letters in order
pub fn group_by_initial(contacts: &[Contact]) -> BTreeMap<char, Vec<Contact>> {
    let mut groups: BTreeMap<char, Vec<Contact>> = BTreeMap::new();
    for contact in contacts {
        let letter = contact.group_letter().unwrap_or('#');
        groups.entry(letter).or_default().push(contact.clone());
    }
    for group in groups.values_mut() {
        group.sort_by_key(|contact| contact.name.to_lowercase());
    }
    groups
}
