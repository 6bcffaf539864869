//! Task operations: create, edit, delete and board moves.

use chrono::NaiveDate;
use serde_json::Value;

use super::membership::{self, Membership};
use crate::domain::validation::validate_task;
use crate::domain::{
    is_sample_id, ActiveUser, DomainError, DomainResult, Status, Subtask, Task, TaskDraft,
};
use crate::repository::{Collection, DocumentStore, StoreError};

/// Task service over a document store
pub struct TaskService<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> TaskService<'a, S>
where
    S: DocumentStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn tasks(&self) -> Collection<'a, Task, S> {
        Collection::new(self.store)
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Task>> {
        self.tasks().list().await
    }

    /// Tasks listed in the session
    pub async fn list_for_user(&self, active: &ActiveUser) -> DomainResult<Vec<Task>> {
        let mut tasks = self.list_all().await?;
        tasks.retain(|task| active.owns_task(task.id));
        Ok(tasks)
    }

    pub async fn get(&self, task_id: u32) -> DomainResult<Task> {
        self.tasks().get(task_id).await
    }

    /// Validate and store a new task, then attach it to the active user.
    ///
    /// The id is pushed to the session first. If the user record cannot be
    /// updated the session entry is taken back out and the error returned;
    /// the task record itself stays.
    pub async fn create(&self, draft: &TaskDraft, active: &mut ActiveUser, today: NaiveDate) -> DomainResult<Task> {
        validate_task(draft, today).into_result()?;
        let date = draft
            .parsed_due_date()
            .ok_or_else(|| DomainError::InvalidInput(format!("due date '{}'", draft.due_date)))?;
        let category = draft
            .category
            .ok_or_else(|| DomainError::InvalidInput("missing category".to_string()))?;

        let task = Task {
            id: 0,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date,
            category,
            priority: draft.priority,
            status: draft.status,
            assigned: draft.assigned.clone(),
            user: draft.assign_self.then_some(active.id),
            subtasks: number_subtasks(&draft.subtasks),
        };
        let task = self.tasks().create(task).await?;

        if active.owns_task(task.id) {
            return Ok(task);
        }
        active.tasks.push(task.id);
        if !active.is_guest() {
            if let Err(e) = membership::add_to_user(self.store, Membership::Tasks, active.id, task.id).await {
                log::error!("[tasks] could not add task {} to user {}: {}", task.id, active.id, e);
                active.tasks.retain(|id| *id != task.id);
                return Err(e);
            }
        }
        Ok(task)
    }

    /// Rewrite a task from the edit form. Status is kept; subtasks keep
    /// their done flag when their name survived the edit.
    pub async fn edit(&self, task_id: u32, draft: &TaskDraft, active: &ActiveUser, today: NaiveDate) -> DomainResult<Task> {
        validate_task(draft, today).into_result()?;
        let mut task = self.get(task_id).await?;

        if let Some(date) = draft.parsed_due_date() {
            task.date = date;
        }
        if let Some(category) = draft.category {
            task.category = category;
        }
        task.title = draft.title.trim().to_string();
        task.description = draft.description.trim().to_string();
        task.priority = draft.priority;
        task.assigned = draft.assigned.clone();
        task.user = draft.assign_self.then_some(active.id);
        task.subtasks = task.rebuild_subtasks(&draft.subtasks);

        self.tasks().save(&task).await?;
        log::info!("[tasks] edited task {}", task_id);
        Ok(task)
    }

    /// Delete a task for the active user.
    ///
    /// Sample tasks are only detached from the active user's record. Other
    /// tasks are removed from the store and from every user. The session
    /// loses the id either way.
    pub async fn delete(&self, task_id: u32, active: &mut ActiveUser) -> DomainResult<()> {
        let result = if is_sample_id(task_id) {
            if active.is_guest() {
                Ok(())
            } else {
                membership::remove_from_user(self.store, Membership::Tasks, active.id, task_id).await
            }
        } else {
            match self.tasks().remove(task_id).await {
                Ok(()) if active.is_guest() => Ok(()),
                Ok(()) => membership::remove_from_all_users(self.store, Membership::Tasks, task_id).await,
                Err(e) => Err(e),
            }
        };
        if let Err(e) = &result {
            log::error!("[tasks] delete of task {} incomplete: {}", task_id, e);
        }
        active.tasks.retain(|id| *id != task_id);
        result
    }

    /// Drop handler: put the task into `status`
    pub async fn move_to_status(&self, task_id: u32, status: Status) -> DomainResult<Task> {
        let mut task = self.get(task_id).await?;
        if task.status == status {
            return Ok(task);
        }
        self.tasks()
            .write_field(task_id, "status", &Value::from(status.as_str()))
            .await?;
        log::info!("[tasks] task {} moved {} -> {}", task_id, task.status.as_str(), status.as_str());
        task.status = status;
        Ok(task)
    }

    /// Arrow buttons: one column left (`-1`) or right (`1`), nothing past the ends
    pub async fn move_by_step(&self, task_id: u32, direction: i32) -> DomainResult<Task> {
        let task = self.get(task_id).await?;
        match task.status.shifted(direction) {
            Some(status) => self.move_to_status(task_id, status).await,
            None => Ok(task),
        }
    }

    pub async fn toggle_subtask(&self, task_id: u32, sub_id: u32, done: bool) -> DomainResult<Task> {
        let mut task = self.get(task_id).await?;
        if !task.set_subtask_done(sub_id, done) {
            return Err(DomainError::NotFound(format!("subtask {} of task {}", sub_id, task_id)));
        }
        let path = format!("{}/subtasks", Collection::<Task, S>::record_path(task_id)?);
        let subtasks = serde_json::to_value(&task.subtasks).map_err(|source| StoreError::Decode { path, source })?;
        self.tasks().write_field(task_id, "subtasks", &subtasks).await?;
        Ok(task)
    }
}

/// Subtasks from form names, numbered from 1
fn number_subtasks(names: &[String]) -> Vec<Subtask> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(index, name)| Subtask {
            sub_id: index as u32 + 1,
            sub_task_name: name.to_string(),
            done: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority, User};
    use crate::repository::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: "Prepare the quarterly report".to_string(),
            due_date: "2026-11-01".to_string(),
            category: Some(Category::TechnicalTask),
            priority: Priority::Urgent,
            subtasks: vec!["Collect numbers".to_string(), "Write summary".to_string()],
            ..Default::default()
        }
    }

    async fn store_with_user() -> (MemoryStore, ActiveUser) {
        let store = MemoryStore::new();
        let user = User::new_signup(1, "Max Mustermann".into(), "MM".into(), "max@example.com".into(), "Secret1!".into());
        Collection::<User, _>::new(&store).save(&user).await.unwrap();
        (store, ActiveUser::from(&user))
    }

    #[tokio::test]
    async fn test_create_read_delete_round_trip() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);

        let created = service.create(&draft("Report"), &mut active, today()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.subtasks[1].sub_id, 2);
        assert!(active.owns_task(1));

        let read = service.get(created.id).await.unwrap();
        assert_eq!(read, created);
        let user = Collection::<User, _>::new(&store).get(1).await.unwrap();
        assert!(user.tasks.contains(&1));

        // id 1 is a sample id, so a second task is created to test full removal
        let second = service.create(&draft("Other"), &mut active, today()).await.unwrap();
        for id in 3..=11 {
            let mut filler = second.clone();
            filler.id = id;
            Collection::<Task, _>::new(&store).save(&filler).await.unwrap();
        }
        let own = service.create(&draft("Own"), &mut active, today()).await.unwrap();
        assert_eq!(own.id, 12);

        service.delete(own.id, &mut active).await.unwrap();
        assert!(Collection::<Task, _>::new(&store).find_by_id(12).await.unwrap().is_none());
        assert!(!active.owns_task(12));
        let user = Collection::<User, _>::new(&store).get(1).await.unwrap();
        assert!(!user.tasks.contains(&12));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_form() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let mut invalid = draft("   ");
        invalid.category = Some(Category::Tutorial);

        let err = service.create(&invalid, &mut active, today()).await.unwrap_err();
        assert_eq!(err.field_errors().unwrap().len(), 2);
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_reverts_session_when_user_write_fails() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let before = active.tasks.clone();

        store.fail_writes_under(Some("users")).await;
        let result = service.create(&draft("Report"), &mut active, today()).await;
        store.fail_writes_under(None).await;

        assert!(matches!(result, Err(DomainError::Store(_))));
        assert_eq!(active.tasks, before);
        assert!(service.get(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_guest_create_skips_user_record() {
        let store = MemoryStore::new();
        let mut guest = ActiveUser::guest();
        let service = TaskService::new(&store);

        let mut form = draft("Guest task");
        form.assign_self = true;
        let created = service.create(&form, &mut guest, today()).await.unwrap();

        assert_eq!(created.user, Some(0));
        assert!(guest.owns_task(created.id));
        assert!(store.get("users").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edit_keeps_status_and_done_flags() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let created = service.create(&draft("Report"), &mut active, today()).await.unwrap();
        service.toggle_subtask(created.id, 2, true).await.unwrap();
        service.move_to_status(created.id, Status::AwaitFeedback).await.unwrap();

        let mut form = TaskDraft::from_task(&service.get(created.id).await.unwrap(), active.id);
        form.title = "Report v2".to_string();
        form.subtasks = vec!["Write summary".to_string(), "Proofread".to_string()];
        form.assign_self = true;
        let edited = service.edit(created.id, &form, &active, today()).await.unwrap();

        assert_eq!(edited.title, "Report v2");
        assert_eq!(edited.status, Status::AwaitFeedback);
        assert_eq!(edited.user, Some(1));
        assert_eq!(edited.subtasks.len(), 2);
        assert_eq!(edited.subtasks[0].sub_id, 1);
        assert!(edited.subtasks[0].done);
        assert!(!edited.subtasks[1].done);
    }

    #[tokio::test]
    async fn test_edit_drops_blank_subtask_names() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let created = service.create(&draft("Report"), &mut active, today()).await.unwrap();
        service.toggle_subtask(created.id, 1, true).await.unwrap();

        let mut form = TaskDraft::from_task(&service.get(created.id).await.unwrap(), active.id);
        form.subtasks = vec!["  Collect numbers ".to_string(), "   ".to_string(), String::new(), "Proofread".to_string()];
        let edited = service.edit(created.id, &form, &active, today()).await.unwrap();

        let names: Vec<&str> = edited.subtasks.iter().map(|s| s.sub_task_name.as_str()).collect();
        assert_eq!(names, vec!["Collect numbers", "Proofread"]);
        assert_eq!(edited.subtasks[1].sub_id, 2);
        assert!(edited.subtasks[0].done);
        assert_eq!(service.get(created.id).await.unwrap().subtasks, edited.subtasks);
    }

    #[tokio::test]
    async fn test_move_by_step_stops_at_ends() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let created = service.create(&draft("Report"), &mut active, today()).await.unwrap();

        let moved = service.move_by_step(created.id, -1).await.unwrap();
        assert_eq!(moved.status, Status::Todo);

        let moved = service.move_by_step(created.id, 1).await.unwrap();
        assert_eq!(moved.status, Status::InProgress);
        assert_eq!(service.get(created.id).await.unwrap().status, Status::InProgress);

        service.move_to_status(created.id, Status::Done).await.unwrap();
        let moved = service.move_by_step(created.id, 1).await.unwrap();
        assert_eq!(moved.status, Status::Done);
    }

    #[tokio::test]
    async fn test_toggle_unknown_subtask() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let created = service.create(&draft("Report"), &mut active, today()).await.unwrap();

        let err = service.toggle_subtask(created.id, 9, true).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_sample_task_only_detaches() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let sample = service.create(&draft("Sample"), &mut active, today()).await.unwrap();
        assert!(is_sample_id(sample.id));

        service.delete(sample.id, &mut active).await.unwrap();

        assert!(service.get(sample.id).await.is_ok());
        assert!(!active.owns_task(sample.id));
        let user = Collection::<User, _>::new(&store).get(1).await.unwrap();
        assert!(!user.tasks.contains(&sample.id));
    }

    /// Tasks 1..=11 in the store, task 11 listed on user 1
    async fn store_with_own_task() -> (MemoryStore, ActiveUser) {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        let first = service.create(&draft("Report"), &mut active, today()).await.unwrap();
        for id in 2..=11 {
            let mut filler = first.clone();
            filler.id = id;
            Collection::<Task, _>::new(&store).save(&filler).await.unwrap();
        }
        membership::add_to_user(&store, Membership::Tasks, active.id, 11).await.unwrap();
        active.tasks.push(11);
        (store, active)
    }

    #[tokio::test]
    async fn test_guest_delete_leaves_user_records_alone() {
        let (store, _) = store_with_own_task().await;
        let service = TaskService::new(&store);
        let mut guest = ActiveUser::guest();
        guest.tasks.push(11);

        // Any user rewrite would fail
        store.fail_writes_under(Some("users")).await;
        service.delete(11, &mut guest).await.unwrap();
        store.fail_writes_under(None).await;

        assert!(service.get(11).await.is_err());
        assert!(!guest.owns_task(11));
        let user = Collection::<User, _>::new(&store).get(1).await.unwrap();
        assert!(user.tasks.contains(&11));
    }

    #[tokio::test]
    async fn test_delete_drops_session_id_when_store_fails() {
        let (store, mut active) = store_with_own_task().await;
        let service = TaskService::new(&store);

        store.set_offline(true);
        let result = service.delete(11, &mut active).await;
        store.set_offline(false);

        assert!(matches!(result, Err(DomainError::Store(_))));
        assert!(!active.owns_task(11));
        assert!(service.get(11).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_drops_session_id_when_user_write_fails() {
        let (store, mut active) = store_with_own_task().await;
        let service = TaskService::new(&store);

        store.fail_writes_under(Some("users")).await;
        let result = service.delete(11, &mut active).await;
        store.fail_writes_under(None).await;

        assert!(result.is_err());
        assert!(!active.owns_task(11));
        assert!(service.get(11).await.is_err());
    }

    #[tokio::test]
    async fn test_list_for_user_filters_by_session() {
        let (store, mut active) = store_with_user().await;
        let service = TaskService::new(&store);
        service.create(&draft("Mine"), &mut active, today()).await.unwrap();
        let mut other = ActiveUser::guest();
        other.tasks.clear();
        service.create(&draft("Theirs"), &mut other, today()).await.unwrap();

        let titles: Vec<String> = service.list_for_user(&active).await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Mine".to_string()]);
    }
}
