//! User store: validation, hashing and uniqueness-checked persistence of users

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::UsersConfig;
use crate::domain::user::{
    normalize_email, normalize_phone_number, validate_email, validate_password,
    validate_phone_number, validate_username, NewUser, User, UserRepository, UserService,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Rules applied to user mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPolicy {
    pub allow_username_change: bool,
    pub allow_email_change: bool,
    pub min_password_length: usize,
}

impl Default for UserPolicy {
    fn default() -> Self {
        Self {
            allow_username_change: false,
            allow_email_change: true,
            min_password_length: 6,
        }
    }
}

impl From<&UsersConfig> for UserPolicy {
    fn from(config: &UsersConfig) -> Self {
        Self {
            allow_username_change: config.allow_username_change,
            allow_email_change: config.allow_email_change,
            min_password_length: config.min_password_length,
        }
    }
}

/// `UserService` implementation over a repository backend and a password hasher
#[derive(Debug)]
pub struct UserStore<R: UserRepository, H: PasswordHasher + 'static> {
    repository: Arc<R>,
    hasher: Arc<H>,
    policy: UserPolicy,
}

impl<R: UserRepository, H: PasswordHasher + 'static> UserStore<R, H> {
    /// Create a store with the default policy
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self::with_policy(repository, hasher, UserPolicy::default())
    }

    pub fn with_policy(repository: Arc<R>, hasher: Arc<H>, policy: UserPolicy) -> Self {
        Self {
            repository,
            hasher,
            policy,
        }
    }

    // Argon2 is CPU bound; keep it off the async workers

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                DomainError::internal(format!("Password verification task failed: {}", e))
            })
    }

    async fn require(&self, id: Uuid) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    fn check_password(&self, password: &str) -> Result<(), DomainError> {
        validate_password(password, self.policy.min_password_length)
            .map_err(|e| DomainError::validation(e.to_string()))
    }

    fn checked_phone_number(&self, phone_number: Option<&str>) -> Result<Option<String>, DomainError> {
        let phone_number = normalize_phone_number(phone_number);

        if let Some(phone) = &phone_number {
            validate_phone_number(phone).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        Ok(phone_number)
    }
}

#[async_trait]
impl<R: UserRepository, H: PasswordHasher + 'static> UserService for UserStore<R, H> {
    #[instrument(skip(self))]
    async fn get(&self, login: &str) -> Result<User, DomainError> {
        self.repository
            .get_by_username(login)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", login)))
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let email = normalize_email(email);

        self.repository
            .get_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No user with email '{}'", email)))
    }

    #[instrument(skip(self))]
    async fn get_by_phone_number(&self, phone_number: &str) -> Result<User, DomainError> {
        let not_found =
            || DomainError::not_found(format!("No user with phone number '{}'", phone_number));

        let Some(phone) = normalize_phone_number(Some(phone_number)) else {
            return Err(not_found());
        };

        self.repository
            .get_by_phone_number(&phone)
            .await?
            .ok_or_else(not_found)
    }

    #[instrument(skip(self, token))]
    async fn update_auth_token(&self, id: Uuid, token: &str) -> Result<(), DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::validation("Auth token cannot be empty"));
        }

        self.repository.set_auth_token(id, token).await?;
        debug!(user_id = %id, "Auth token updated");

        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn validate_password(&self, username: &str, password: &str) -> Result<User, DomainError> {
        // Always read the persisted record; results are never cached
        let user = self.get(username).await?;

        if !self.verify_password(password, user.password_hash()).await? {
            warn!(username = %username, "Password mismatch");
            return Err(DomainError::invalid_credentials(format!(
                "Password does not match for user '{}'",
                username
            )));
        }

        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let stored = self.require(user.id()).await?;
        let mut edited = user.clone();

        if edited.username() != stored.username() {
            if !self.policy.allow_username_change {
                return Err(DomainError::validation("Username cannot be changed"));
            }
            validate_username(edited.username())
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let email = normalize_email(edited.email());
        if email != stored.email() {
            if !self.policy.allow_email_change {
                return Err(DomainError::validation("Email cannot be changed"));
            }
            validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;
        }
        edited.set_email(email);

        let phone_number = self.checked_phone_number(edited.phone_number())?;
        edited.set_phone_number(phone_number);

        let saved = self.repository.update(&edited).await?;
        info!(username = %saved.username(), "User saved");

        Ok(saved)
    }

    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        validate_username(&new_user.username).map_err(|e| DomainError::validation(e.to_string()))?;

        let email = normalize_email(&new_user.email);
        validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

        let phone_number = self.checked_phone_number(new_user.phone_number.as_deref())?;
        self.check_password(&new_user.password)?;

        // Skip the hashing cost for obvious duplicates; insert stays the authority
        if self
            .repository
            .get_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_key(format!(
                "Username '{}' already exists",
                new_user.username
            )));
        }

        let password_hash = self.hash_password(&new_user.password).await?;

        let user = User::new(
            new_user.id.unwrap_or_else(Uuid::new_v4),
            new_user.username,
            email,
            phone_number,
            password_hash,
            new_user.created_at.unwrap_or_else(Utc::now),
        );

        let user = self.repository.insert(user).await?;
        info!(user_id = %user.id(), "User created");

        Ok(user)
    }

    #[instrument(skip(self, current_password, new_password))]
    async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        let user = self.require(id).await?;

        if !self.verify_password(current_password, user.password_hash()).await? {
            return Err(DomainError::invalid_credentials("Current password is incorrect"));
        }

        self.check_password(new_password)?;
        let new_hash = self.hash_password(new_password).await?;

        let user = self.repository.set_password_hash(id, &new_hash).await?;
        info!(user_id = %id, "Password changed");

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
