//! User Entity
//!
//! Registered accounts and the signed-in session derived from them.

use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::entity::Entity;
use super::serde_util;

/// Colour given to every user; marks a user shown in the contact list
pub const USER_COLOR: &str = "#ffffff";

/// Sample tasks a new account starts with
const SIGNUP_TASKS: std::ops::RangeInclusive<u32> = 6..=10;
/// Sample tasks the guest sees
const GUEST_TASKS: std::ops::RangeInclusive<u32> = 1..=5;
/// Sample contacts every account starts with
const STARTER_CONTACTS: std::ops::RangeInclusive<u32> = 1..=10;

/// Registered account as stored under `users/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub initials: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_user_color")]
    pub color: String,
    /// Set when the user edits themself through the contact dialog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Owned task ids
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub tasks: Vec<u32>,
    /// Visible contact ids
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub contacts: Vec<u32>,
}

fn default_user_color() -> String {
    USER_COLOR.to_string()
}

impl User {
    /// New account with the starter tasks and contacts
    pub fn new_signup(id: u32, name: String, initials: String, email: String, password: String) -> Self {
        Self {
            id,
            name,
            initials,
            email,
            password,
            color: USER_COLOR.to_string(),
            phone: None,
            tasks: SIGNUP_TASKS.collect(),
            contacts: STARTER_CONTACTS.collect(),
        }
    }

    /// The user rendered as a contact entry (id 0)
    pub fn as_contact(&self) -> Contact {
        Contact {
            id: 0,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
            color: self.color.clone(),
            initials: self.initials.clone(),
        }
    }

    pub fn email_matches(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Signed-in identity cached in the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUser {
    pub id: u32,
    pub name: String,
    pub initials: String,
    pub color: String,
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub tasks: Vec<u32>,
    #[serde(default, deserialize_with = "serde_util::sparse_list")]
    pub contacts: Vec<u32>,
}

impl ActiveUser {
    /// Guest session: no user record, sample data only
    pub fn guest() -> Self {
        Self {
            id: 0,
            name: "Guest".to_string(),
            initials: "G".to_string(),
            color: USER_COLOR.to_string(),
            tasks: GUEST_TASKS.collect(),
            contacts: STARTER_CONTACTS.collect(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == 0
    }

    pub fn owns_task(&self, task_id: u32) -> bool {
        self.tasks.contains(&task_id)
    }

    pub fn knows_contact(&self, contact_id: u32) -> bool {
        self.contacts.contains(&contact_id)
    }
}

impl From<&User> for ActiveUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            initials: user.initials.clone(),
            color: user.color.clone(),
            tasks: user.tasks.clone(),
            contacts: user.contacts.clone(),
        }
    }
}

/// Raw signup form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub legal_accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guest_session() {
        let guest = ActiveUser::guest();
        assert!(guest.is_guest());
        assert_eq!(guest.tasks, vec![1, 2, 3, 4, 5]);
        assert_eq!(guest.contacts.len(), 10);
    }

    #[test]
    fn test_signup_user_defaults() {
        let user = User::new_signup(3, "Max Mustermann".into(), "MM".into(), "max@example.com".into(), "Secret1!".into());
        assert_eq!(user.tasks, vec![6, 7, 8, 9, 10]);
        assert_eq!(user.contacts, (1..=10).collect::<Vec<_>>());
        assert_eq!(user.color, USER_COLOR);
    }

    #[test]
    fn test_user_with_emptied_arrays() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Max Mustermann",
            "initials": "MM",
            "email": "max@example.com",
            "password": "Secret1!",
            "color": "#ffffff"
        }))
        .unwrap();
        assert!(user.tasks.is_empty());
        assert!(user.contacts.is_empty());
        assert!(serde_json::to_value(&user).unwrap().get("phone").is_none());
    }

    #[test]
    fn test_user_as_contact() {
        let mut user = User::new_signup(2, "Max Mustermann".into(), "MM".into(), "max@example.com".into(), "x".into());
        user.phone = Some("0176 1234567".into());
        let contact = user.as_contact();
        assert_eq!(contact.id, 0);
        assert_eq!(contact.phone, "0176 1234567");
        assert_eq!(ActiveUser::from(&user).id, 2);
    }

    #[test]
    fn test_email_match_ignores_case() {
        let user = User::new_signup(2, "Max".into(), "M".into(), "Max@Example.com".into(), "x".into());
        assert!(user.email_matches(" max@example.COM "));
        assert!(!user.email_matches("other@example.com"));
    }
}
