//! Shopper accounts.
//!
//! Accounts are kept in the local key/value store: the signed-in user under
//! [`keys::USER`] and every registered account under
//! [`keys::REGISTERED_USERS`]. Passwords are validated for presence but never
//! stored or checked; signing in with an unknown email creates a demo
//! account.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use forgotten_essentials_core::{Email, UserId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::store::{KeyValueStore, keys, load_json, save_json};

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A shopper account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    fn new(email: Email, first_name: &str, last_name: &str) -> Self {
        Self {
            id: UserId::new(format!("user_{}", uuid::Uuid::new_v4().simple())),
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: Utc::now(),
        }
    }

    /// "First Last", or just the first name when there is no last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Sign-in state for one session.
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    user: Option<User>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .finish_non_exhaustive()
    }
}

impl AuthSession {
    /// Restore the signed-in user, if any.
    ///
    /// A corrupt user record is discarded and the session starts signed out.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let user: Option<User> = load_json(store.as_ref(), keys::USER);
        if let Some(user) = &user {
            set_sentry_user(&user.id, Some(user.email.as_str()));
        }
        Self { store, user }
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Sign in.
    ///
    /// Returns the registered account for `email` (matched case-insensitively),
    /// or a new demo account named after the email's local part.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::MissingPassword` for an empty password, or
    /// `AuthError::Store` if the session cannot be saved.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let user = self
            .registered_users()
            .into_iter()
            .find(|u| u.email.matches(email.as_str()))
            .unwrap_or_else(|| {
                let first_name = email.local_part().to_string();
                User::new(email, &first_name, "")
            });

        self.sign_in(user)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail`, `AuthError::MissingField`,
    /// `AuthError::MissingPassword` or `AuthError::WeakPassword` for bad
    /// input, or `AuthError::Store` if the account cannot be saved.
    #[instrument(skip(self, password))]
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AuthError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(AuthError::MissingField("first name"));
        }
        let email = Email::parse(email)?;
        validate_password(password)?;

        let user = User::new(email, first_name, last_name.trim());

        let mut users = self.registered_users();
        users.push(user.clone());
        save_json(self.store.as_ref(), keys::REGISTERED_USERS, &users)?;

        self.sign_in(user)
    }

    /// Sign out. Signing out when already signed out is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the saved session cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "User signed out");
        }
        clear_sentry_user();
        self.store.remove(keys::USER)?;
        Ok(())
    }

    fn sign_in(&mut self, user: User) -> Result<User, AuthError> {
        save_json(self.store.as_ref(), keys::USER, &user)?;
        set_sentry_user(&user.id, Some(user.email.as_str()));
        info!(user_id = %user.id, "User signed in");
        self.user = Some(user.clone());
        Ok(user)
    }

    fn registered_users(&self) -> Vec<User> {
        load_json(self.store.as_ref(), keys::REGISTERED_USERS).unwrap_or_default()
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> (AuthSession, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (AuthSession::load(Arc::clone(&store)), store)
    }

    #[test]
    fn test_login_unknown_email_creates_demo_user() {
        let (mut auth, store) = session();
        let user = auth.login("kurt@example.com", "anything").unwrap();

        assert_eq!(user.first_name, "kurt");
        assert!(user.last_name.is_empty());
        assert!(user.id.as_str().starts_with("user_"));
        assert!(auth.is_authenticated());
        assert!(store.get(keys::USER).is_some());
    }

    #[test]
    fn test_login_finds_registered_user_case_insensitively() {
        let (mut auth, _store) = session();
        let registered = auth
            .register("Dana@Example.com", "secret1", "Dana", "Scully")
            .unwrap();
        auth.logout().unwrap();

        let user = auth.login("dana@example.com", "x").unwrap();
        assert_eq!(user, registered);
        assert_eq!(user.display_name(), "Dana Scully");
    }

    #[test]
    fn test_login_validation() {
        let (mut auth, _store) = session();
        assert!(matches!(
            auth.login("not-an-email", "pw"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.login("a@b.com", ""),
            Err(AuthError::MissingPassword)
        ));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_register_validation() {
        let (mut auth, _store) = session();
        assert!(matches!(
            auth.register("a@b.com", "secret1", "  ", ""),
            Err(AuthError::MissingField("first name"))
        ));
        assert!(matches!(
            auth.register("a@b.com", "abc", "Ann", ""),
            Err(AuthError::WeakPassword(6))
        ));
    }

    #[test]
    fn test_session_survives_reload() {
        let (mut auth, store) = session();
        let user = auth.login("kim@example.com", "pw").unwrap();

        let reloaded = AuthSession::load(store);
        assert_eq!(reloaded.current_user(), Some(&user));
    }

    #[test]
    fn test_corrupt_user_record_signs_out() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(keys::USER, "{\"id\":").unwrap();

        let auth = AuthSession::load(Arc::clone(&store));
        assert!(auth.current_user().is_none());
        assert!(store.get(keys::USER).is_none());
    }

    #[test]
    fn test_logout_clears_persisted_user() {
        let (mut auth, store) = session();
        auth.login("kim@example.com", "pw").unwrap();
        auth.logout().unwrap();

        assert!(!auth.is_authenticated());
        assert!(store.get(keys::USER).is_none());
        assert!(auth.logout().is_ok());
    }
}
