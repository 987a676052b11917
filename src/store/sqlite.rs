//! SQLite document store
//!
//! Stores the serialized state document as a single row of the `app_state`
//! table, keyed by [`STATE_DOCUMENT_ID`].

use super::{DocumentStore, StoreError, STATE_DOCUMENT_ID};
use crate::state::AppState;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// SQLite-backed state document store
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (and create if missing) the database and run migrations
    ///
    /// # Arguments
    /// * `db_url` - `sqlite:` connection string or a bare file path
    pub async fn connect(db_url: &str) -> Result<Self, StoreError> {
        let connection_string = if db_url.starts_with("sqlite:") {
            db_url.to_string()
        } else {
            format!("sqlite:{}", db_url)
        };

        // Ensure parent directory exists for on-disk databases
        let path = connection_string
            .trim_start_matches("sqlite:")
            .trim_start_matches("//");
        if !path.starts_with(":memory:") {
            if let Some(parent) = PathBuf::from(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Unavailable(format!("Failed to create db directory: {}", e))
                    })?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| StoreError::Unavailable(format!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to database: {}", e)))?;

        info!("Connected to SQLite database at: {}", path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StoreError> {
        let migration_sql = include_str!("../../migrations/001_create_app_state.sql");

        let statements = migration_sql
            .lines()
            .map(|line| line.split("--").next().unwrap_or_default().trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        for statement in statements.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(format!("Migration failed: {}", e)))?;
        }

        debug!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self) -> Result<Option<AppState>, StoreError> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM app_state WHERE id = ?")
                .bind(STATE_DOCUMENT_ID)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Read(e.to_string()))?;

        document
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn put(&self, state: &AppState) -> Result<(), StoreError> {
        let document = serde_json::to_string(state)?;
        let updated_at = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO app_state (id, document, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
        )
        .bind(STATE_DOCUMENT_ID)
        .bind(&document)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        debug!("Wrote state document ({} bytes)", document.len());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
