//! Task and contact id lists kept on user records and in the session.

use serde_json::Value;

use crate::domain::{DomainError, DomainResult, User};
use crate::repository::{Collection, DocumentStore};

/// Which id list of a user a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Tasks,
    Contacts,
}

impl Membership {
    pub fn field(&self) -> &'static str {
        match self {
            Membership::Tasks => "tasks",
            Membership::Contacts => "contacts",
        }
    }

    fn user_ids<'u>(&self, user: &'u mut User) -> &'u mut Vec<u32> {
        match self {
            Membership::Tasks => &mut user.tasks,
            Membership::Contacts => &mut user.contacts,
        }
    }
}

async fn write_ids<S>(users: Collection<'_, User, S>, kind: Membership, user: &mut User) -> DomainResult<()>
where
    S: DocumentStore + ?Sized,
{
    let ids = Value::from(kind.user_ids(user).clone());
    users.write_field(user.id, kind.field(), &ids).await
}

/// Append `id` to a user's record unless it is already listed.
/// A missing user record is logged and ignored.
pub async fn add_to_user<S>(store: &S, kind: Membership, user_id: u32, id: u32) -> DomainResult<()>
where
    S: DocumentStore + ?Sized,
{
    let users = Collection::<User, S>::new(store);
    let mut user = match users.get(user_id).await {
        Ok(user) => user,
        Err(DomainError::NotFound(what)) => {
            log::warn!("[membership] no record for {}, {} {} not attached", what, kind.field(), id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    if kind.user_ids(&mut user).contains(&id) {
        return Ok(());
    }
    kind.user_ids(&mut user).push(id);
    write_ids(users, kind, &mut user).await
}

/// Remove `id` from one user's record
pub async fn remove_from_user<S>(store: &S, kind: Membership, user_id: u32, id: u32) -> DomainResult<()>
where
    S: DocumentStore + ?Sized,
{
    let users = Collection::<User, S>::new(store);
    let Some(mut user) = users.find_by_id(user_id).await? else {
        return Ok(());
    };
    let ids = kind.user_ids(&mut user);
    if !ids.contains(&id) {
        return Ok(());
    }
    ids.retain(|other| *other != id);
    write_ids(users, kind, &mut user).await
}

/// Remove `id` from every user that lists it.
/// Keeps going after a failed write and reports the first failure.
pub async fn remove_from_all_users<S>(store: &S, kind: Membership, id: u32) -> DomainResult<()>
where
    S: DocumentStore + ?Sized,
{
    let users = Collection::<User, S>::new(store);
    let mut first_error = None;
    for mut user in users.list().await? {
        let ids = kind.user_ids(&mut user);
        if !ids.contains(&id) {
            continue;
        }
        ids.retain(|other| *other != id);
        if let Err(e) = write_ids(users, kind, &mut user).await {
            log::error!("[membership] failed to detach {} {} from user {}: {}", kind.field(), id, user.id, e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;

    async fn store_with_users() -> MemoryStore {
        let store = MemoryStore::new();
        let users = Collection::<User, _>::new(&store);
        for (name, email) in [("Max Mustermann", "max@example.com"), ("Erika Muster", "erika@example.com")] {
            let user = User::new_signup(0, name.into(), "XX".into(), email.into(), "Secret1!".into());
            users.create(user).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_add_to_user_once() {
        let store = store_with_users().await;
        add_to_user(&store, Membership::Tasks, 1, 11).await.unwrap();
        add_to_user(&store, Membership::Tasks, 1, 11).await.unwrap();

        let user = Collection::<User, _>::new(&store).get(1).await.unwrap();
        assert_eq!(user.tasks, vec![6, 7, 8, 9, 10, 11]);
    }

    #[tokio::test]
    async fn test_add_to_missing_user_is_ignored() {
        let store = store_with_users().await;
        assert!(add_to_user(&store, Membership::Contacts, 9, 11).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_from_all_users() {
        let store = store_with_users().await;
        remove_from_all_users(&store, Membership::Contacts, 3).await.unwrap();

        for user in Collection::<User, _>::new(&store).list().await.unwrap() {
            assert!(!user.contacts.contains(&3));
            assert_eq!(user.contacts.len(), 9);
        }
    }

    #[tokio::test]
    async fn test_remove_from_one_user() {
        let store = store_with_users().await;
        remove_from_user(&store, Membership::Tasks, 2, 6).await.unwrap();

        let users = Collection::<User, _>::new(&store).list().await.unwrap();
        assert!(users[0].tasks.contains(&6));
        assert!(!users[1].tasks.contains(&6));
    }
}
