//! Boundary-facing facade over the user service

use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::domain::user::{NewUser, User, UserService};
use crate::domain::DomainError;

/// Error kinds visible outside the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateKey,
    InvalidCredentials,
    StorageUnavailable,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateKey => "duplicate_key",
            Self::InvalidCredentials => "invalid_credentials",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Failure returned by the facade
///
/// Storage and internal failures carry a generic message; the detailed one is only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::new(ErrorKind::NotFound, message),
            DomainError::DuplicateKey { message } => Self::new(ErrorKind::DuplicateKey, message),
            DomainError::InvalidCredentials { message } => {
                Self::new(ErrorKind::InvalidCredentials, message)
            }
            DomainError::Validation { message } => Self::new(ErrorKind::Validation, message),
            DomainError::StorageUnavailable { message } => {
                error!(error = %message, "User storage unavailable");
                Self::new(
                    ErrorKind::StorageUnavailable,
                    "User storage is temporarily unavailable",
                )
            }
            DomainError::Internal { message } => {
                error!(error = %message, "Internal user service error");
                Self::new(ErrorKind::Internal, "Internal server error")
            }
        }
    }
}

/// Thin facade over a `UserService`, translating errors for the outside world
#[derive(Debug, Clone)]
pub struct UserFacade {
    service: Arc<dyn UserService>,
}

impl UserFacade {
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }

    pub async fn get(&self, login: &str) -> Result<User, ServiceError> {
        Ok(self.service.get(login).await?)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User, ServiceError> {
        Ok(self.service.get_by_email(email).await?)
    }

    pub async fn get_by_phone_number(&self, phone_number: &str) -> Result<User, ServiceError> {
        Ok(self.service.get_by_phone_number(phone_number).await?)
    }

    pub async fn update_auth_token(&self, id: Uuid, token: &str) -> Result<(), ServiceError> {
        Ok(self.service.update_auth_token(id, token).await?)
    }

    pub async fn validate_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        Ok(self.service.validate_password(username, password).await?)
    }

    pub async fn save(&self, user: &User) -> Result<User, ServiceError> {
        Ok(self.service.save(user).await?)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User, ServiceError> {
        Ok(self.service.create(new_user).await?)
    }

    pub async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, ServiceError> {
        Ok(self
            .service
            .change_password(id, current_password, new_password)
            .await?)
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.service.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::{Argon2Hasher, UserStore};

    fn create_facade() -> (UserFacade, Arc<MockUserRepository>) {
        let repository = Arc::new(MockUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap());
        let store = UserStore::new(Arc::clone(&repository), hasher);
        (UserFacade::new(Arc::new(store)), repository)
    }

    #[tokio::test]
    async fn test_passes_kinds_through() {
        let (facade, _) = create_facade();
        facade
            .create(NewUser::new("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        let err = facade.get("bob").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = facade
            .create(NewUser::new("alice", "b@x.com", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateKey);

        let err = facade.validate_password("alice", "wrong").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);

        let err = facade
            .create(NewUser::new("x", "bad", "secret1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_storage_details_are_hidden() {
        let (facade, repository) = create_facade();
        repository.set_should_fail(true).await;

        let err = facade.get("alice").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StorageUnavailable);
        assert!(!err.message.contains("Mock"));
        assert_eq!(err.message, "User storage is temporarily unavailable");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ServiceError::from(DomainError::internal("task panicked at src/lib.rs"));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[tokio::test]
    async fn test_update_auth_token_roundtrip() {
        let (facade, _) = create_facade();
        let user = facade
            .create(NewUser::new("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        facade.update_auth_token(user.id(), "tok123").await.unwrap();
        assert_eq!(
            facade.get("alice").await.unwrap().auth_token(),
            Some("tok123")
        );
        assert_eq!(facade.count().await.unwrap(), 1);
    }
}
