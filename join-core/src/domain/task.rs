//! Task Entity
//!
//! A card on the board: status column, priority, assignees and subtasks.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, Entity};
use super::serde_util;

/// Board column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl Status {
    /// Columns in board order
    pub const ALL: [Status; 4] = [Status::Todo, Status::InProgress, Status::AwaitFeedback, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inprogress",
            Status::AwaitFeedback => "awaitfeedback",
            Status::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "To do",
            Status::InProgress => "In progress",
            Status::AwaitFeedback => "Await feedback",
            Status::Done => "Done",
        }
    }

    /// Position on the board, left to right
    pub fn index(&self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::AwaitFeedback => 2,
            Status::Done => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Status::ALL.get(index).copied()
    }

    /// Neighbouring column, `None` past either end
    pub fn shifted(&self, direction: i32) -> Option<Self> {
        let index = self.index() as i64 + direction as i64;
        usize::try_from(index).ok().and_then(Status::from_index)
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown status '{}'", s)))
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::Urgent => "Urgent",
        }
    }
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Technical Task")]
    TechnicalTask,
    #[serde(rename = "User Story")]
    UserStory,
    /// Only used by the bundled sample tasks
    #[serde(rename = "Tutorial")]
    Tutorial,
}

impl Category {
    /// Categories a user can pick in the task form
    pub const SELECTABLE: [Category; 2] = [Category::TechnicalTask, Category::UserStory];

    pub fn label(&self) -> &'static str {
        match self {
            Category::TechnicalTask => "Technical Task",
            Category::UserStory => "User Story",
            Category::Tutorial => "Tutorial",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [Category::TechnicalTask, Category::UserStory, Category::Tutorial]
            .into_iter()
            .find(|category| category.label() == label)
    }

    /// CSS class: label lowercased with whitespace removed
    pub fn css_class(&self) -> String {
        self.label().split_whitespace().collect::<String>().to_lowercase()
    }

    pub fn is_selectable(&self) -> bool {
        Category::SELECTABLE.contains(self)
    }
}

/// A checklist entry inside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// 1-based position within the task
    pub sub_id: u32,
    pub sub_task_name: String,
    #[serde(default)]
    pub done: bool,
}

/// A task card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Due date
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    /// Assigned contact ids
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub assigned: Vec<u32>,
    /// Owning user, shown as an extra assignee
    #[serde(default, with = "serde_util::owner")]
    pub user: Option<u32>,
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub subtasks: Vec<Subtask>,
}

/// Words kept on a board card before the description is cut
const SHORT_DESCRIPTION_WORDS: usize = 6;

impl Task {
    /// (done, total) subtask counts
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.done).count();
        (done, self.subtasks.len())
    }

    /// Share of finished subtasks in percent (0 without subtasks)
    pub fn progress_percent(&self) -> u32 {
        let (done, total) = self.subtask_progress();
        if total == 0 {
            return 0;
        }
        ((done * 100) / total) as u32
    }

    /// Description cut to its first words for the board card
    pub fn short_description(&self) -> String {
        let words: Vec<&str> = self.description.split_whitespace().collect();
        if words.len() <= SHORT_DESCRIPTION_WORDS {
            return self.description.clone();
        }
        format!("{}...", words[..SHORT_DESCRIPTION_WORDS].join(" "))
    }

    /// Case-insensitive match on title or description
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Rebuild subtasks from a list of names, numbering them 1..n and
    /// keeping the done flag of names that already existed. Blank names
    /// are dropped.
    pub fn rebuild_subtasks(&self, names: &[String]) -> Vec<Subtask> {
        names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(index, name)| Subtask {
                sub_id: index as u32 + 1,
                sub_task_name: name.to_string(),
                done: self
                    .subtasks
                    .iter()
                    .find(|existing| existing.sub_task_name == name)
                    .map(|existing| existing.done)
                    .unwrap_or(false),
            })
            .collect()
    }

    /// Set a subtask's done flag; false when no subtask has that id
    pub fn set_subtask_done(&mut self, sub_id: u32, done: bool) -> bool {
        match self.subtasks.iter_mut().find(|s| s.sub_id == sub_id) {
            Some(subtask) => {
                subtask.done = done;
                true
            }
            None => false,
        }
    }

    /// Drop a contact from the assignee list; true if it was assigned
    pub fn unassign(&mut self, contact_id: u32) -> bool {
        let before = self.assigned.len();
        self.assigned.retain(|id| *id != contact_id);
        self.assigned.len() != before
    }
}

impl Entity for Task {
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Raw task form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` as delivered by a date input
    pub due_date: String,
    pub category: Option<Category>,
    pub priority: Priority,
    pub assigned: Vec<u32>,
    /// Whether the active user is assigned as owner
    pub assign_self: bool,
    pub subtasks: Vec<String>,
    /// Column the task is created in
    pub status: Status,
}

impl TaskDraft {
    /// Prefill the edit form from an existing task
    pub fn from_task(task: &Task, active_user_id: u32) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.date.format("%Y-%m-%d").to_string(),
            category: Some(task.category),
            priority: task.priority,
            assigned: task.assigned.clone(),
            assign_self: task.user == Some(active_user_id),
            subtasks: task.subtasks.iter().map(|s| s.sub_task_name.clone()).collect(),
            status: task.status,
        }
    }

    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_task() -> Task {
        serde_json::from_value(json!({
            "id": 3,
            "title": "3. Edit Cards",
            "description": "You can freely edit your cards and move tasks between sections as needed.",
            "date": "2025-07-20",
            "category": "Tutorial",
            "priority": "low",
            "status": "inprogress",
            "assigned": [4, null, 6],
            "user": "",
            "subtasks": [
                { "subId": 1, "subTaskName": "Change the title of a task.", "done": true },
                { "subId": 2, "subTaskName": "Delete a task.", "done": false }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_task_deserialization() {
        let task = sample_task();
        assert_eq!(task.id(), 3);
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.assigned, vec![4, 6]);
        assert_eq!(task.user, None);
        assert_eq!(task.subtask_progress(), (1, 2));
        assert_eq!(task.progress_percent(), 50);
    }

    #[test]
    fn test_task_without_optional_arrays() {
        let task: Task = serde_json::from_value(json!({
            "id": 2,
            "title": "2. Sample Tasks and Contacts",
            "date": "2025-07-03",
            "category": "Tutorial",
            "priority": "urgent",
            "status": "todo",
            "user": 4
        }))
        .unwrap();
        assert!(task.subtasks.is_empty());
        assert!(task.assigned.is_empty());
        assert_eq!(task.user, Some(4));
        assert_eq!(task.progress_percent(), 0);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(Status::AwaitFeedback.as_str(), "awaitfeedback");
        assert_eq!("inprogress".parse::<Status>().unwrap(), Status::InProgress);
        assert!(matches!("in progress".parse::<Status>(), Err(DomainError::InvalidInput(_))));
        assert_eq!(serde_json::to_value(Status::AwaitFeedback).unwrap(), json!("awaitfeedback"));
    }

    #[test]
    fn test_status_shift() {
        assert_eq!(Status::Todo.shifted(1), Some(Status::InProgress));
        assert_eq!(Status::Done.shifted(-1), Some(Status::AwaitFeedback));
        assert_eq!(Status::Todo.shifted(-1), None);
        assert_eq!(Status::Done.shifted(1), None);
    }

    #[test]
    fn test_category_css_class() {
        assert_eq!(Category::TechnicalTask.css_class(), "technicaltask");
        assert_eq!(Category::UserStory.css_class(), "userstory");
        assert_eq!(Category::from_label("User Story"), Some(Category::UserStory));
        assert!(!Category::Tutorial.is_selectable());
    }

    #[test]
    fn test_short_description() {
        let mut task = sample_task();
        assert_eq!(task.short_description(), "You can freely edit your cards...");

        task.description = "Short enough".to_string();
        assert_eq!(task.short_description(), "Short enough");
    }

    #[test]
    fn test_matches_search() {
        let task = sample_task();
        assert!(task.matches_search("EDIT"));
        assert!(task.matches_search("between sections"));
        assert!(task.matches_search(""));
        assert!(!task.matches_search("contacts"));
    }

    #[test]
    fn test_rebuild_subtasks_keeps_done_flags() {
        let task = sample_task();
        let names = vec!["Delete a task.".to_string(), "Change the title of a task.".to_string(), "New".to_string()];
        let rebuilt = task.rebuild_subtasks(&names);

        assert_eq!(rebuilt.len(), 3);
        assert_eq!(rebuilt[0].sub_id, 1);
        assert!(!rebuilt[0].done);
        assert_eq!(rebuilt[1].sub_id, 2);
        assert!(rebuilt[1].done);
        assert!(!rebuilt[2].done);
    }

    #[test]
    fn test_draft_from_task() {
        let mut task = sample_task();
        task.user = Some(5);
        let draft = TaskDraft::from_task(&task, 5);
        assert_eq!(draft.due_date, "2025-07-20");
        assert!(draft.assign_self);
        assert_eq!(draft.subtasks.len(), 2);
        assert_eq!(draft.parsed_due_date(), Some(task.date));
    }
}
