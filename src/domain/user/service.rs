//! User service contract

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Lookup, credential-check and mutation capabilities over stored users.
///
/// Every method either succeeds or returns a typed `DomainError`; lookups fail with
/// `NotFound` instead of returning `Option`.
#[async_trait]
pub trait UserService: Send + Sync + Debug {
    /// Get a user by login (username)
    async fn get(&self, login: &str) -> Result<User, DomainError>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Get the most recently created user with this phone number
    async fn get_by_phone_number(&self, phone_number: &str) -> Result<User, DomainError>;

    /// Replace the auth token of the user with the given ID
    async fn update_auth_token(&self, id: Uuid, token: &str) -> Result<(), DomainError>;

    /// Check a username/password pair against the persisted hash
    async fn validate_password(&self, username: &str, password: &str)
        -> Result<User, DomainError>;

    /// Persist profile changes of an existing user
    async fn save(&self, user: &User) -> Result<User, DomainError>;

    /// Create a user, hashing the supplied plaintext password
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Replace the password after verifying the current one
    async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, DomainError>;

    /// Number of stored users
    async fn count(&self) -> Result<usize, DomainError>;
}
