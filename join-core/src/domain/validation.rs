//! Form validation for signup, contacts and tasks.
//!
//! Every rule reports into a [`FieldErrors`] so forms can show all
//! problems at once.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::contact::ContactDraft;
use super::entity::FieldErrors;
use super::task::TaskDraft;
use super::user::SignupDraft;

/// Form field keys used in [`FieldErrors`]
pub mod field {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    pub const LEGAL: &str = "legal";
    pub const TITLE: &str = "title";
    pub const DUE_DATE: &str = "due_date";
    pub const CATEGORY: &str = "category";
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static USER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-zÄäÖöÜüß\s]+$").unwrap());
static CONTACT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÄäÖöÜüß]+(\s+[A-Za-zÄäÖöÜüß]+)+$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\d{1,3}?[-.\s]?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}$").unwrap()
});

const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";
const MIN_PASSWORD_LEN: usize = 8;
const MIN_USER_NAME_LEN: usize = 3;
const MAX_CONTACT_NAME_LEN: usize = 23;
const MAX_PHONE_LEN: usize = 15;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 chars with a lower, an upper, a digit and a special character
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Signup form rules. `email_registered` comes from the store lookup.
pub fn validate_signup(draft: &SignupDraft, email_registered: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let email = draft.email.trim();
    let name = draft.name.trim();

    if email_registered {
        errors.push(field::EMAIL, "This email address is already registered.");
    } else if !is_valid_email(email) {
        errors.push(field::EMAIL, "Enter a valid e-mail address.");
    }

    if name.chars().count() < MIN_USER_NAME_LEN {
        errors.push(field::NAME, "Enter a name of at least 3 letters.");
    }
    if !USER_NAME_RE.is_match(name) {
        errors.push(field::NAME, "Your name should only contain letters and spaces.");
    }

    if !is_strong_password(&draft.password) {
        errors.push(
            field::PASSWORD,
            "Your password must be at least 8 characters long and contain at least 1 upper case letter, \
             1 lower case letter, 1 number and 1 special character.",
        );
    }
    if draft.password != draft.confirm_password {
        errors.push(field::CONFIRM_PASSWORD, "Your passwords don't match. Please try again.");
    }

    if !draft.legal_accepted {
        errors.push(field::LEGAL, "Please accept the Legal notice.");
    }
    errors
}

/// Contact dialog rules
pub fn validate_contact(draft: &ContactDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !CONTACT_NAME_RE.is_match(&draft.name) || draft.name.chars().count() > MAX_CONTACT_NAME_LEN {
        errors.push(field::NAME, "⚠ Please enter at least two words and keep it under 23 characters.");
    }
    if !is_valid_email(&draft.email) {
        errors.push(field::EMAIL, "⚠ Please enter a valid email address.");
    }
    if !PHONE_RE.is_match(&draft.phone) || draft.phone.chars().count() > MAX_PHONE_LEN {
        errors.push(field::PHONE, "⚠ Please enter a phone number with 8 to 15 digits.");
    }
    errors
}

/// Task form rules; the due date may not lie before `today`
pub fn validate_task(draft: &TaskDraft, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.title.trim().is_empty() {
        errors.push(field::TITLE, "This field is required");
    }
    match draft.parsed_due_date() {
        Some(date) if date >= today => {}
        _ => errors.push(field::DUE_DATE, "This field is required"),
    }
    if !draft.category.is_some_and(|c| c.is_selectable()) {
        errors.push(field::CATEGORY, "This field is required");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn signup() -> SignupDraft {
        SignupDraft {
            name: "Max Mustermann".into(),
            email: "max@example.com".into(),
            password: "Secret1!".into(),
            confirm_password: "Secret1!".into(),
            legal_accepted: true,
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup(&signup(), false).is_empty());
    }

    #[test]
    fn test_signup_collects_all_errors() {
        let draft = SignupDraft {
            name: "M1".into(),
            email: "not-an-email".into(),
            password: "weak".into(),
            confirm_password: "other".into(),
            legal_accepted: false,
        };
        let errors = validate_signup(&draft, false);
        assert_eq!(errors.len(), 6);
        assert!(errors.has(field::EMAIL));
        assert!(errors.has(field::CONFIRM_PASSWORD));
        assert!(errors.has(field::LEGAL));
    }

    #[test]
    fn test_signup_registered_email() {
        let errors = validate_signup(&signup(), true);
        assert_eq!(errors.first(field::EMAIL), Some("This email address is already registered."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_signup_accepts_umlauts() {
        let mut draft = signup();
        draft.name = "Jörg Müßig".into();
        assert!(validate_signup(&draft, false).is_empty());
    }

    #[test]
    fn test_password_strength() {
        assert!(is_strong_password("Abcdefg1!"));
        assert!(!is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("abcdefg1!"));
        assert!(!is_strong_password("Ab1!"));
    }

    #[test]
    fn test_contact_rules() {
        let ok = ContactDraft {
            name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            phone: "0176-8165542".into(),
        };
        assert!(validate_contact(&ok).is_empty());

        let single_word = ContactDraft { name: "Ada".into(), ..ok.clone() };
        assert!(validate_contact(&single_word).has(field::NAME));

        let too_long = ContactDraft { name: "Adalberta Maximiliane Lovelace".into(), ..ok.clone() };
        assert!(validate_contact(&too_long).has(field::NAME));

        let bad_phone = ContactDraft { phone: "12".into(), ..ok.clone() };
        assert_eq!(validate_contact(&bad_phone).len(), 1);

        let intl_phone = ContactDraft { phone: "+49 176 8165542".into(), ..ok };
        assert!(validate_contact(&intl_phone).is_empty());
    }

    #[test]
    fn test_task_rules() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let draft = TaskDraft {
            title: "Write release notes".into(),
            due_date: "2026-10-18".into(),
            category: Some(Category::UserStory),
            ..Default::default()
        };
        assert!(validate_task(&draft, today).is_empty());

        let past = TaskDraft { due_date: "2026-10-17".into(), ..draft.clone() };
        assert!(validate_task(&past, today).has(field::DUE_DATE));

        let tutorial = TaskDraft { category: Some(Category::Tutorial), ..draft.clone() };
        assert!(validate_task(&tutorial, today).has(field::CATEGORY));

        let empty = TaskDraft::default();
        assert_eq!(validate_task(&empty, today).len(), 3);
    }
}
