//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, username, email, phone_number, password_hash, auth_token, created_at, updated_at";

const UNIQUE_VIOLATION: &str = "23505";
const QUERY_CANCELED: &str = "57014";

/// PostgreSQL implementation of UserRepository
///
/// Uniqueness is enforced by the `users` table constraints, so concurrent inserts race
/// inside the database rather than in this process.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        column: &str,
        value: &str,
        context: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);

        sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error(context, e))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get user", e))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("username", username, "Failed to get user by username")
            .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_by("email", email, "Failed to get user by email")
            .await
    }

    async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            r#"
            SELECT {}
            FROM users
            WHERE phone_number = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to get user by phone number", e))
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, phone_number, password_hash, auth_token,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id())
        .bind(user.username())
        .bind(user.email())
        .bind(user.phone_number())
        .bind(user.password_hash())
        .bind(user.auth_token())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create user", &user, e))?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, phone_number = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user.id())
            .bind(user.username())
            .bind(user.email())
            .bind(user.phone_number())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("Failed to update user", user, e))?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", user.id())))
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<User, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update password", e))?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    async fn set_auth_token(&self, id: Uuid, token: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET auth_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to update auth token", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count users", e))?;

        Ok(count as usize)
    }
}

/// Map a failed write, turning unique violations into `DuplicateKey`
fn write_error(context: &str, user: &User, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return duplicate_key_error(db_error.constraint(), user);
        }
    }

    storage_error(context, error)
}

fn duplicate_key_error(constraint: Option<&str>, user: &User) -> DomainError {
    match constraint {
        Some(name) if name.contains("username") => {
            DomainError::duplicate_key(format!("Username '{}' already exists", user.username()))
        }
        Some(name) if name.contains("email") => {
            DomainError::duplicate_key(format!("Email '{}' already exists", user.email()))
        }
        _ => DomainError::duplicate_key(format!("User with ID '{}' already exists", user.id())),
    }
}

/// Every other database failure, including pool and statement timeouts, is transient
fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    let timed_out = match &error {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(QUERY_CANCELED),
        _ => false,
    };

    if timed_out {
        DomainError::storage_unavailable(format!("{}: operation timed out", context))
    } else {
        DomainError::storage_unavailable(format!("{}: {}", context, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_user() -> User {
        User::new(Uuid::new_v4(), "alice", "a@x.com", None, "hash", Utc::now())
    }

    #[test]
    fn test_duplicate_key_from_constraint_name() {
        let user = create_test_user();

        let err = duplicate_key_error(Some("users_username_key"), &user);
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
        assert!(err.to_string().contains("Username 'alice'"));

        let err = duplicate_key_error(Some("users_email_key"), &user);
        assert!(err.to_string().contains("Email 'a@x.com'"));

        let err = duplicate_key_error(Some("users_pkey"), &user);
        assert!(err.to_string().contains(&user.id().to_string()));

        let err = duplicate_key_error(None, &user);
        assert!(matches!(err, DomainError::DuplicateKey { .. }));
    }

    #[test]
    fn test_pool_timeout_is_storage_unavailable() {
        let err = storage_error("Failed to get user", sqlx::Error::PoolTimedOut);

        assert!(err.is_transient());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_other_errors_are_storage_unavailable() {
        let user = create_test_user();
        let err = write_error(
            "Failed to create user",
            &user,
            sqlx::Error::Protocol("connection reset".to_string()),
        );

        assert!(matches!(err, DomainError::StorageUnavailable { .. }));
        assert!(err.to_string().contains("connection reset"));
    }
}
