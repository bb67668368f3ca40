//! User registry
//!
//! A small user-management service:
//! - Users with unique login and email, optional phone number
//! - Argon2id password hashing and verification
//! - Opaque auth tokens issued on login
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use domain::user::UserService;
use infrastructure::storage::PostgresConfig;
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserFacade, UserPolicy,
    UserStore,
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::from_config(&config.hashing)?);
    let policy = UserPolicy::from(&config.users);

    info!(backend = ?config.storage.backend, "Storage backend");

    let service: Arc<dyn UserService> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(UserStore::with_policy(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
            policy,
        )),
        StorageBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let pool = PostgresConfig::from_storage_config(&config.storage)
                .connect()
                .await?;
            info!("PostgreSQL connection established");

            Arc::new(UserStore::with_policy(
                Arc::new(PostgresUserRepository::new(pool)),
                hasher,
                policy,
            ))
        }
    };

    Ok(AppState::new(Arc::new(UserFacade::new(service))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::user::NewUser;

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let mut config = AppConfig::default();
        config.hashing.memory_kib = 1024;
        config.hashing.iterations = 1;

        let state = create_app_state_with_config(&config).await.unwrap();
        let user = state
            .user_facade
            .create(NewUser::new("alice", "a@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(state.user_facade.get("alice").await.unwrap().id(), user.id());
    }

    #[tokio::test]
    async fn test_invalid_hashing_config_rejected() {
        let mut config = AppConfig::default();
        config.hashing.iterations = 0;

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
