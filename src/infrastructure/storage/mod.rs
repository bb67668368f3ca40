//! Storage infrastructure - PostgreSQL pooling and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{revert_last_migration, run_migrations, Migration, PostgresMigrator};
pub use postgres::PostgresConfig;
