//! User entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique identifier, assigned once at creation
    id: Uuid,
    /// Login name, unique across all users
    #[serde(rename = "login")]
    username: String,
    /// Normalized email, unique across all users
    email: String,
    /// Optional phone number, not unique
    phone_number: Option<String>,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Opaque bearer token issued on login - never exposed in serialization
    #[serde(skip_serializing)]
    auth_token: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record from an already hashed password
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        phone_number: Option<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            phone_number,
            password_hash: password_hash.into(),
            auth_token: None,
            created_at,
            updated_at: created_at,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the username; only persisted when username changes are allowed
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_phone_number(&mut self, phone_number: Option<String>) {
        self.phone_number = phone_number;
        self.touch();
    }

    pub(crate) fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub(crate) fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
        self.touch();
    }

    /// Copy the profile fields (username, email, phone number) of `edited` into this record.
    /// Hash, token, id and creation time are left untouched.
    pub(crate) fn apply_profile(&mut self, edited: &User) {
        self.username = edited.username.clone();
        self.email = edited.email.clone();
        self.phone_number = edited.phone_number.clone();
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a user; carries the plaintext password until the store hashes it
#[derive(Clone)]
pub struct NewUser {
    /// Assigned by the store when `None`
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    /// Assigned by the store when `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            phone_number: None,
            password: password.into(),
            created_at: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str) -> User {
        User::new(
            Uuid::new_v4(),
            username,
            format!("{}@example.com", username),
            Some("+1 555 0100".to_string()),
            "hashed_password",
            Utc::now(),
        )
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("alice");

        assert_eq!(user.username(), "alice");
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.phone_number(), Some("+1 555 0100"));
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(user.auth_token().is_none());
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_set_auth_token_touches_record() {
        let mut user = create_test_user("alice");
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_auth_token("tok123");
        assert_eq!(user.auth_token(), Some("tok123"));
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_apply_profile_keeps_credentials() {
        let mut stored = create_test_user("alice");
        stored.set_auth_token("stored-token");

        let mut edited = stored.clone();
        edited.set_password_hash("tampered");
        edited.set_auth_token("tampered-token");
        edited.set_email("new@example.com");
        edited.set_phone_number(None);

        stored.apply_profile(&edited);
        assert_eq!(stored.password_hash(), "hashed_password");
        assert_eq!(stored.auth_token(), Some("stored-token"));
        assert_eq!(stored.email(), "new@example.com");
        assert!(stored.phone_number().is_none());
    }

    #[test]
    fn test_user_serialization_excludes_secrets() {
        let mut user = create_test_user("alice");
        user.set_auth_token("tok123");

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"login\":\"alice\""));
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("tok123"));
    }

    #[test]
    fn test_new_user_debug_redacts_password() {
        let new_user = NewUser::new("alice", "a@x.com", "secret1");
        let debug = format!("{:?}", new_user);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret1"));
    }
}
