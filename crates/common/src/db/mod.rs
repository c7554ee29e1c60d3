//! Database layer for CiteShelf
//!
//! Provides:
//! - SeaORM entity model for publications
//! - Repository (the publication store gateway)
//! - Connection pool management

pub mod models;
mod repository;

pub use repository::Repository;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use models::PublicationEntity;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper.
///
/// Created once at startup; clones share the same underlying pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to publication store...");

        let mut opts = ConnectOptions::new(&config.url);
        opts
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .sqlx_logging(true);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Publication store connection established");

        Ok(Self { conn })
    }

    /// The shared connection
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Create the publications table from the entity if it is missing
    pub async fn ensure_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut stmt = schema.create_table_from_entity(PublicationEntity);
        stmt.if_not_exists();

        self.conn
            .execute(backend.build(&stmt))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Publications table setup failed");
                AppError::StoreSchema(e)
            })?;

        info!("Publications table ready");
        Ok(())
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }
}

/// Single-connection in-memory SQLite pool with the schema in place
#[cfg(test)]
pub(crate) async fn memory_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let pool = DbPool::new(&config).await.expect("sqlite pool");
    pool.ensure_schema().await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_memory_store() {
        let pool = memory_pool().await;
        assert!(pool.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_schema_is_repeatable() {
        let pool = memory_pool().await;
        assert!(pool.ensure_schema().await.is_ok());
    }

    #[tokio::test]
    async fn test_schema_failure_is_reported() {
        let pool = memory_pool().await;
        pool.conn().clone().close().await.unwrap();

        let err = pool.ensure_schema().await.err().expect("schema setup must fail");
        assert!(matches!(err, AppError::StoreSchema(_)));
        assert!(matches!(pool.ping().await, Err(AppError::DatabaseConnection { .. })));
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        let config = DatabaseConfig {
            url: "postgres://127.0.0.1:1/research_publications".to_string(),
            connect_timeout_secs: 1,
            ..DatabaseConfig::default()
        };
        let err = DbPool::new(&config).await.err().expect("connection must fail");
        assert!(matches!(err, AppError::DatabaseConnection { .. }));
    }
}
