//! Board view model: columns, search and assignee badges.
//!
//! Pure functions over already loaded tasks and contacts.

use crate::domain::{ActiveUser, Contact, Status, Task};

/// Shown when a search matches nothing
pub const NO_TASK_FOUND: &str = "No task found";

/// Badges on a card when the owner is not shown
const MAX_BADGES: usize = 3;
/// Badges on a card when the owner takes one slot
const MAX_BADGES_WITH_OWNER: usize = 2;

/// One status column with its cards
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub status: Status,
    pub tasks: Vec<Task>,
}

/// Split tasks into the four columns, keeping only search matches
pub fn columns(tasks: &[Task], query: &str) -> Vec<BoardColumn> {
    Status::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status == status && task.matches_search(query))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Whether a non-empty search left every column empty
pub fn nothing_found(columns: &[BoardColumn], query: &str) -> bool {
    !query.trim().is_empty() && columns.iter().all(|column| column.tasks.is_empty())
}

/// Avatars shown on a board card
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssigneeBadges {
    pub contacts: Vec<Contact>,
    /// Assignees beyond the shown ones, rendered as `+N`
    pub overflow: usize,
    /// The active user owns the task and gets their own badge
    pub show_owner: bool,
}

pub fn assignee_badges(task: &Task, contacts: &[Contact], active: &ActiveUser) -> AssigneeBadges {
    let show_owner = task.user == Some(active.id);
    let max = if show_owner { MAX_BADGES_WITH_OWNER } else { MAX_BADGES };
    let shown = task
        .assigned
        .iter()
        .take(max)
        .filter_map(|id| known_contact(*id, contacts, active))
        .cloned()
        .collect();
    AssigneeBadges {
        contacts: shown,
        overflow: task.assigned.len().saturating_sub(max),
        show_owner,
    }
}

/// Everyone listed in the task detail view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recipients {
    pub owner: bool,
    pub contacts: Vec<Contact>,
}

impl Recipients {
    pub fn is_empty(&self) -> bool {
        !self.owner && self.contacts.is_empty()
    }
}

pub fn recipients(task: &Task, contacts: &[Contact], active: &ActiveUser) -> Recipients {
    Recipients {
        owner: task.user == Some(active.id),
        contacts: contacts
            .iter()
            .filter(|c| task.assigned.contains(&c.id) && active.knows_contact(c.id))
            .cloned()
            .collect(),
    }
}

fn known_contact<'c>(id: u32, contacts: &'c [Contact], active: &ActiveUser) -> Option<&'c Contact> {
    if !active.knows_contact(id) {
        return None;
    }
    contacts.iter().find(|contact| contact.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};
    use chrono::NaiveDate;

    fn task(id: u32, title: &str, status: Status, assigned: Vec<u32>, user: Option<u32>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: format!("Description of {}", title),
            date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            category: Category::UserStory,
            priority: Priority::Medium,
            status,
            assigned,
            user,
            subtasks: Vec::new(),
        }
    }

    fn contacts() -> Vec<Contact> {
        (1..=6)
            .map(|id| Contact::new(id, format!("Person Number{}", id), String::new(), String::new(), "#000000".into()))
            .collect()
    }

    #[test]
    fn test_columns_and_search() {
        let tasks = vec![
            task(1, "Login page", Status::Todo, vec![], None),
            task(2, "Board layout", Status::Done, vec![], None),
            task(3, "Login API", Status::InProgress, vec![], None),
        ];

        let all = columns(&tasks, "");
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].status, Status::Done);
        assert_eq!(all[3].tasks.len(), 1);

        let filtered = columns(&tasks, "login");
        assert_eq!(filtered[0].tasks.len(), 1);
        assert_eq!(filtered[1].tasks.len(), 1);
        assert!(filtered[3].tasks.is_empty());
        assert!(!nothing_found(&filtered, "login"));

        let none = columns(&tasks, "snake");
        assert!(nothing_found(&none, "snake"));
        assert!(!nothing_found(&columns(&[], ""), ""));
    }

    #[test]
    fn test_badges_limit_and_overflow() {
        let mut active = ActiveUser::guest();
        active.id = 7;
        let card = task(1, "Card", Status::Todo, vec![1, 2, 3, 4, 5], None);

        let badges = assignee_badges(&card, &contacts(), &active);
        assert_eq!(badges.contacts.len(), 3);
        assert_eq!(badges.overflow, 2);
        assert!(!badges.show_owner);

        let owned = task(2, "Owned", Status::Todo, vec![1, 2, 3, 4, 5], Some(7));
        let badges = assignee_badges(&owned, &contacts(), &active);
        assert_eq!(badges.contacts.len(), 2);
        assert_eq!(badges.overflow, 3);
        assert!(badges.show_owner);
    }

    #[test]
    fn test_badges_skip_unknown_contacts() {
        let mut active = ActiveUser::guest();
        active.contacts = vec![2];
        let card = task(1, "Card", Status::Todo, vec![1, 2], None);

        let badges = assignee_badges(&card, &contacts(), &active);
        assert_eq!(badges.contacts.len(), 1);
        assert_eq!(badges.contacts[0].id, 2);
        assert_eq!(badges.overflow, 0);
    }

    #[test]
    fn test_recipients() {
        let active = ActiveUser::guest();
        let card = task(1, "Card", Status::Todo, vec![3, 99], Some(0));
        let found = recipients(&card, &contacts(), &active);
        assert!(found.owner);
        assert_eq!(found.contacts.len(), 1);

        let empty = recipients(&task(2, "Empty", Status::Todo, vec![], None), &contacts(), &active);
        assert!(empty.is_empty());
    }
}
