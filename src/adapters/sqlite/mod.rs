//! SQLite database adapters for resplan.

pub mod calendar_repository;
pub mod configuration_repository;
pub mod connection;
pub mod cost_category_repository;
pub mod migrations;
pub mod order_sequence_repository;

pub use calendar_repository::SqliteBaseCalendarRepository;
pub use configuration_repository::SqliteConfigurationRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use cost_category_repository::SqliteCostCategoryRepository;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use order_sequence_repository::SqliteOrderSequenceRepository;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DatabaseConfig;

/// Parse a UUID string from a SQLite row field.
pub fn parse_uuid(s: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| DomainError::Serialization(e.to_string()))
}

/// Parse an optional UUID string from a SQLite row field.
pub fn parse_optional_uuid(s: Option<String>) -> DomainResult<Option<Uuid>> {
    s.map(|s| Uuid::parse_str(&s))
        .transpose()
        .map_err(|e| DomainError::Serialization(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Opens the configured database and brings its schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(&config.url(), &PoolConfig::from(config)).await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}
