//! User infrastructure module
//!
//! Implementations behind the user domain: Argon2 password hashing, in-memory and
//! PostgreSQL repositories, the `UserStore` service and the boundary facade.

mod facade;
mod password;
mod postgres_repository;
mod repository;
mod store;

pub use facade::{ErrorKind, ServiceError, UserFacade};
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use store::{UserPolicy, UserStore};
