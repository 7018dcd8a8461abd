//! # Profile Store Handle
//!
//! Opens the SQLite file that holds saved profiles.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)          DbConfig::in_memory()          │
//! │          │                            │                      │
//! │          └────────────┬───────────────┘                      │
//! │                       ▼                                      │
//! │  Database::new(config) ── WAL, create file, apply migrations │
//! │                       │                                      │
//! │                       ▼                                      │
//! │  db.profiles() ──► ProfileRepository                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI runs one command per process, so the pool stays small. An
//! in-memory store lives inside a single connection and is pinned to one.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::profile::ProfileRepository;

const MEMORY_PATH: &str = ":memory:";
const FILE_POOL_SIZE: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Configuration
// =============================================================================

/// Where the profile store lives and whether to migrate it on open.
///
/// ## Example
/// ```rust
/// use drivecost_db::DbConfig;
///
/// let config = DbConfig::new("/path/to/drivecost.db").run_migrations(false);
/// assert!(!config.run_migrations);
/// assert!(!config.is_in_memory());
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Apply pending migrations when opening. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Store backed by the file at `path`, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            run_migrations: true,
        }
    }

    /// Throwaway store; each call yields an isolated database.
    pub fn in_memory() -> Self {
        DbConfig::new(MEMORY_PATH)
    }

    /// Sets whether to apply migrations when opening.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            FILE_POOL_SIZE
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open profile store. Clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store described by `config`.
    ///
    /// Creates the file if missing, switches it to WAL with NORMAL sync,
    /// then applies migrations unless `run_migrations` is off.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening profile store");

        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool_size = config.pool_size();
        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(ACQUIRE_TIMEOUT);
        if config.is_in_memory() {
            // Dropping the last connection would drop the data with it.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!(pool_size, "Profile store pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over the shared pool.
    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later repository calls fail.
    pub async fn close(&self) {
        debug!("Closing profile store");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
        assert_eq!(db.profiles().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_migrations_can_be_deferred() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert!(total > 0);
        assert_eq!(applied, 0);

        db.run_migrations().await.unwrap();
        assert_eq!(db.profiles().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_store_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.profiles().count().await.unwrap(), 0);
        db.close().await;

        assert!(path.exists());
        assert!(db.profiles().count().await.is_err());
    }

    #[test]
    fn test_pool_size_follows_backing() {
        assert!(DbConfig::in_memory().is_in_memory());
        assert_eq!(DbConfig::in_memory().pool_size(), 1);

        let config = DbConfig::new("/tmp/drivecost.db");
        assert!(!config.is_in_memory());
        assert_eq!(config.pool_size(), FILE_POOL_SIZE);
    }
}
