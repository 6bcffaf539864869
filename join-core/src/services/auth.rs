//! Login, guest access and signup

use crate::domain::validation::validate_signup;
use crate::domain::{initials_of, ActiveUser, DomainError, DomainResult, SignupDraft, User};
use crate::repository::{Collection, DocumentStore};

pub struct AuthService<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> AuthService<'a, S>
where
    S: DocumentStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn users(&self) -> Collection<'a, User, S> {
        Collection::new(self.store)
    }

    /// Match email (case-insensitive) and password (exact)
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<ActiveUser> {
        let user = self
            .users()
            .list()
            .await?
            .into_iter()
            .find(|user| user.email_matches(email) && user.password == password)
            .ok_or(DomainError::InvalidCredentials)?;
        log::info!("[auth] user {} logged in", user.id);
        Ok(ActiveUser::from(&user))
    }

    pub fn guest(&self) -> ActiveUser {
        log::info!("[auth] guest login");
        ActiveUser::guest()
    }

    pub async fn is_email_registered(&self, email: &str) -> DomainResult<bool> {
        Ok(self.users().list().await?.iter().any(|user| user.email_matches(email)))
    }

    /// Register a new account with the starter tasks and contacts
    pub async fn signup(&self, draft: &SignupDraft) -> DomainResult<User> {
        let registered = self.is_email_registered(&draft.email).await?;
        validate_signup(draft, registered).into_result()?;

        let name = draft.name.trim().to_string();
        let user = User::new_signup(
            0,
            name.clone(),
            initials_of(&name),
            draft.email.trim().to_string(),
            draft.password.clone(),
        );
        let user = self.users().create(user).await?;
        log::info!("[auth] registered user {}", user.id);
        Ok(user)
    }

    /// Re-read the session's user record, picking up changes made elsewhere.
    /// The guest has no record and is returned unchanged.
    pub async fn refresh(&self, active: &ActiveUser) -> DomainResult<ActiveUser> {
        if active.is_guest() {
            return Ok(active.clone());
        }
        let user = self.users().get(active.id).await?;
        Ok(ActiveUser::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::field;
    use crate::repository::MemoryStore;

    fn signup_form(email: &str) -> SignupDraft {
        SignupDraft {
            name: "  Max Mustermann ".to_string(),
            email: email.to_string(),
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
            legal_accepted: true,
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let user = auth.signup(&signup_form("max@example.com")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Max Mustermann");
        assert_eq!(user.initials, "MM");

        let active = auth.login("MAX@example.com ", "Secret1!").await.unwrap();
        assert_eq!(active.id, 1);
        assert_eq!(active.tasks, vec![6, 7, 8, 9, 10]);
        assert_eq!(active.contacts.len(), 10);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.signup(&signup_form("max@example.com")).await.unwrap();

        let err = auth.login("max@example.com", "secret1!").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(err.to_string(), "Check your email and password. Please try again.");
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.signup(&signup_form("max@example.com")).await.unwrap();

        let err = auth.signup(&signup_form("Max@Example.com")).await.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.first(field::EMAIL), Some("This email address is already registered."));
        assert!(auth.is_email_registered("MAX@EXAMPLE.COM").await.unwrap());
    }

    #[tokio::test]
    async fn test_refresh_picks_up_record_changes() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let mut user = auth.signup(&signup_form("max@example.com")).await.unwrap();
        let active = auth.login("max@example.com", "Secret1!").await.unwrap();

        user.tasks.push(11);
        Collection::<User, _>::new(&store).save(&user).await.unwrap();

        let refreshed = auth.refresh(&active).await.unwrap();
        assert!(refreshed.owns_task(11));
        assert_eq!(auth.refresh(&auth.guest()).await.unwrap(), ActiveUser::guest());
    }
}
