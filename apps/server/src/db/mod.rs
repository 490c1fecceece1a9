//! Database module providing connection management, migrations, and queries.
//!
//! Query methods live on `DbPool`, grouped by table. Operations that must run
//! inside a caller's transaction are free functions generic over
//! `ConnectionTrait`, so they accept either the pool connection or a
//! `DatabaseTransaction`.

pub mod projects;
pub mod report_files;
pub mod reviews;
pub mod summaries;
pub mod test_results;
pub mod users;

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, Statement, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::{Config, DatabaseSettings};
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Shared database handle.
///
/// Cloning is cheap; all clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database).await
    }

    /// Connect using explicit database settings.
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            backend = ?conn.get_database_backend(),
            max_connections = settings.max_connections,
            "Database pool created"
        );

        Ok(DbPool { conn })
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Start a transaction.
    ///
    /// Inside the transaction use the returned handle only; with a
    /// single-connection pool a second checkout would wait forever.
    pub async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.conn
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))
    }

    /// Round-trip a trivial query to check connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        let backend: DatabaseBackend = self.conn.get_database_backend();
        let stmt = Statement::from_string(backend, "SELECT 1".to_owned());
        self.conn
            .query_one_raw(stmt)
            .await
            .map_err(|e| AppError::Database(format!("Ping failed: {}", e)))?;
        Ok(())
    }
}
