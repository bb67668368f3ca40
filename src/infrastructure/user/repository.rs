//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<Uuid, StoredUser>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, Uuid>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, Uuid>,
    next_seq: u64,
}

#[derive(Debug)]
struct StoredUser {
    user: User,
    /// Insertion order, breaks created_at ties
    seq: u64,
}

impl UserTable {
    fn get_mut(&mut self, id: Uuid) -> Result<&mut User, DomainError> {
        self.users
            .get_mut(&id)
            .map(|stored| &mut stored.user)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    fn lookup(&self, index: &HashMap<String, Uuid>, key: &str) -> Option<User> {
        index
            .get(key)
            .and_then(|id| self.users.get(id))
            .map(|stored| stored.user.clone())
    }
}

/// In-memory implementation of UserRepository
///
/// Records and both unique indexes sit behind a single lock, so every uniqueness check
/// and the write that depends on it happen in one critical section.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.lookup(&table.username_index, username))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.lookup(&table.email_index, email))
    }

    async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;

        Ok(table
            .users
            .values()
            .filter(|stored| stored.user.phone_number() == Some(phone_number))
            .max_by_key(|stored| (stored.user.created_at(), stored.seq))
            .map(|stored| stored.user.clone()))
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let id = user.id();
        let username = user.username().to_string();
        let email = user.email().to_string();

        if table.users.contains_key(&id) {
            return Err(DomainError::duplicate_key(format!(
                "User with ID '{}' already exists",
                id
            )));
        }

        if table.username_index.contains_key(&username) {
            return Err(DomainError::duplicate_key(format!(
                "Username '{}' already exists",
                username
            )));
        }

        if table.email_index.contains_key(&email) {
            return Err(DomainError::duplicate_key(format!(
                "Email '{}' already exists",
                email
            )));
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.username_index.insert(username, id);
        table.email_index.insert(email, id);
        table.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                seq,
            },
        );

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        let id = user.id();

        let (old_username, old_email) = {
            let stored = table.get_mut(id)?;
            (stored.username().to_string(), stored.email().to_string())
        };
        let new_username = user.username().to_string();
        let new_email = user.email().to_string();

        // Both checks run before either index changes
        let username_changed = old_username != new_username;
        let email_changed = old_email != new_email;

        if username_changed && table.username_index.contains_key(&new_username) {
            return Err(DomainError::duplicate_key(format!(
                "Username '{}' already exists",
                new_username
            )));
        }

        if email_changed && table.email_index.contains_key(&new_email) {
            return Err(DomainError::duplicate_key(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        if username_changed {
            table.username_index.remove(&old_username);
            table.username_index.insert(new_username, id);
        }

        if email_changed {
            table.email_index.remove(&old_email);
            table.email_index.insert(new_email, id);
        }

        let stored = table.get_mut(id)?;
        stored.apply_profile(user);

        Ok(stored.clone())
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        let stored = table.get_mut(id)?;
        stored.set_password_hash(password_hash);
        Ok(stored.clone())
    }

    async fn set_auth_token(&self, id: Uuid, token: &str) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        table.get_mut(id)?.set_auth_token(token);
        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.table.read().await.users.len())
    }
}
