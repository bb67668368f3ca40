//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::User;
use crate::domain::DomainError;

/// Persistence backend for user records.
///
/// Implementations own the uniqueness constraints: `insert` and `update` must check and
/// write atomically, failing with `DuplicateKey` when the username, email or id is taken.
/// `update` writes profile fields only; hash and token have dedicated setters.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (for login)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get the most recently created user holding this phone number
    async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    /// Update username, email and phone number of an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Replace the password hash of an existing user
    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<User, DomainError>;

    /// Replace the auth token of an existing user
    async fn set_auth_token(&self, id: Uuid, token: &str) -> Result<(), DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;
}
