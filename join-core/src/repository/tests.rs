//! Repository Integration Tests
//!
//! Tests for Collection on top of the in-memory document store.

#[cfg(test)]
mod tests {
    use crate::domain::{Contact, DomainError, Task};
    use crate::repository::{Collection, DocumentStore, MemoryStore};
    use serde_json::json;

    fn contact(name: &str) -> Contact {
        Contact::new(0, name.to_string(), "someone@example.com".to_string(), String::new(), "#123456".to_string())
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);

        let first = repo.create(contact("Ada Lovelace")).await.expect("Failed to create");
        let second = repo.create(contact("Alan Turing")).await.expect("Failed to create");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.initials, "AT");

        let stored = store.get("contacts/1").await.unwrap().unwrap();
        assert_eq!(stored["name"], "Alan Turing");
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);
        let created = repo.create(contact("Grace Hopper")).await.unwrap();

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found.unwrap().name, "Grace Hopper");
        assert!(repo.find_by_id(99).await.unwrap().is_none());
        assert!(matches!(repo.get(99).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_leaves_hole_and_keeps_ids() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);
        for name in ["Ada Lovelace", "Alan Turing", "Grace Hopper"] {
            repo.create(contact(name)).await.unwrap();
        }

        repo.remove(2).await.expect("Delete failed");

        let ids: Vec<u32> = repo.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(repo.next_id().await.unwrap(), 4);
        assert!(repo.find_by_id(3).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_next_id_after_removing_last() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);
        repo.create(contact("Ada Lovelace")).await.unwrap();
        repo.create(contact("Alan Turing")).await.unwrap();

        repo.remove(2).await.unwrap();
        let reused = repo.create(contact("Grace Hopper")).await.unwrap();
        assert_eq!(reused.id, 2);
    }

    #[tokio::test]
    async fn test_id_zero_has_no_record() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);
        assert!(matches!(repo.remove(0).await, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_skips_malformed_records() {
        let store = MemoryStore::with_data(json!({
            "tasks": [
                { "id": 1, "title": "Ok", "date": "2025-07-01", "category": "User Story" },
                { "title": "missing id and date" }
            ]
        }));
        let repo = Collection::<Task, _>::new(&store);
        let tasks = repo.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Ok");
    }

    #[tokio::test]
    async fn test_create_skips_ids_of_undecodable_records() {
        let store = MemoryStore::with_data(json!({
            "tasks": [
                { "id": 1, "title": "Ok", "date": "2025-07-01", "category": "User Story" },
                { "id": 2, "title": "Foreign", "date": "" }
            ]
        }));
        let repo = Collection::<Task, _>::new(&store);
        assert_eq!(repo.list().await.unwrap().len(), 1);

        let mut task = repo.get(1).await.unwrap();
        task.title = "New".to_string();
        let created = repo.create(task).await.unwrap();

        assert_eq!(created.id, 3);
        let foreign = store.get("tasks/1").await.unwrap().unwrap();
        assert_eq!(foreign["title"], "Foreign");
        assert_eq!(store.get("tasks/2").await.unwrap().unwrap()["title"], "New");
    }

    #[tokio::test]
    async fn test_write_field_and_empty_list_deletes() {
        let store = MemoryStore::new();
        let repo = Collection::<Contact, _>::new(&store);
        let created = repo.create(contact("Ada Lovelace")).await.unwrap();

        repo.write_field(created.id, "phone", &json!("0176 1234567")).await.unwrap();
        assert_eq!(repo.get(created.id).await.unwrap().phone, "0176 1234567");

        store.put("users/0/tasks", &json!([1, 2])).await.unwrap();
        store.put("users/0/tasks", &json!([])).await.unwrap();
        assert!(store.get("users").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let repo = Collection::<Contact, _>::new(&store);
        assert!(matches!(repo.create(contact("Ada Lovelace")).await, Err(DomainError::Store(_))));
    }
}
