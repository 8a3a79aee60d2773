//! Database layer for coderev
//!
//! Provides owner-scoped persistence for generated reviews over SQLite.

pub mod error;
pub mod models;
pub mod repos;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

pub use error::{Error, Result};
pub use models::{NewReview, ReviewRecord};
pub use repos::ReviewRepository;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: Database::default_path().unwrap_or_else(|_| PathBuf::from("reviews.db")),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database config with the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at a file path
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        Self::connect(DatabaseConfig::new(db_path.as_ref())).await
    }

    /// Connect to the database with the given configuration
    ///
    /// Creates the parent directory and the database file if needed, and
    /// applies the schema.
    pub async fn connect(config: DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", config.path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        debug!(path = %config.path.display(), "Opened review database");

        let db = Self { pool };
        db.apply_schema().await?;
        Ok(db)
    }

    /// Create an in-memory database for tests
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // A second connection would see a different empty database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.apply_schema().await?;
        Ok(db)
    }

    /// Get the default database path (~/.local/share/coderev/reviews.db)
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Io("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("coderev").join("reviews.db"))
    }

    /// Apply the schema migration
    async fn apply_schema(&self) -> Result<()> {
        let schema = include_str!("../migrations/001_initial_schema.sql");

        sqlx::raw_sql(schema)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;

        Ok(())
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the review repository
    pub fn reviews(&self) -> ReviewRepository<'_> {
        ReviewRepository::new(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let _db = Database::new(&db_path).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_parent_directory_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dirs").join("test.db");

        let _db = Database::new(&db_path).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_schema_is_applied() {
        let db = Database::in_memory().await.unwrap();

        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='reviews'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_schema_application_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Reopening an existing database reapplies the schema harmlessly
        let first = Database::new(&db_path).await.unwrap();
        drop(first);
        let _second = Database::new(&db_path).await.unwrap();
    }
}
