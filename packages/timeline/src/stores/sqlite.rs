//! SQLite storage implementation.
//!
//! A file-based backend for local development and single-server
//! deployments. Events and images are stored as JSON text, timestamps as
//! RFC 3339 strings.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::debug;

use crate::error::{Result, TimelineError};
use crate::traits::store::TimelineStore;
use crate::types::record::TimelineRecord;

/// SQLite-backed timeline cache.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite:./timeline.db?mode=rwc` - File-based, created if missing
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Uses a single connection; each `:memory:` connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS timelines (
                query TEXT PRIMARY KEY,
                full_text TEXT NOT NULL,
                timeline_events TEXT NOT NULL DEFAULT '[]',
                images TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct TimelineRow {
    query: String,
    full_text: String,
    timeline_events: String,
    images: String,
    created_at: String,
}

impl TimelineRow {
    fn into_record(self) -> Result<TimelineRecord> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| TimelineError::storage(format!("Invalid date: {}", e)))?
            .with_timezone(&chrono::Utc);

        Ok(TimelineRecord {
            query: self.query,
            full_text: self.full_text,
            timeline_events: serde_json::from_str(&self.timeline_events)?,
            images: serde_json::from_str(&self.images)?,
            created_at,
        })
    }
}

#[async_trait]
impl TimelineStore for SqliteStore {
    async fn get(&self, query: &str) -> Result<Option<TimelineRecord>> {
        let row = sqlx::query_as::<_, TimelineRow>(
            r#"
            SELECT query, full_text, timeline_events, images, created_at
            FROM timelines
            WHERE query = ?
            "#,
        )
        .bind(query)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TimelineRow::into_record).transpose()
    }

    async fn put(&self, record: &TimelineRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO timelines (query, full_text, timeline_events, images, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.query)
        .bind(&record.full_text)
        .bind(serde_json::to_string(&record.timeline_events)?)
        .bind(serde_json::to_string(&record.images)?)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(query = %record.query, "Timeline already cached, insert skipped");
        }
        Ok(())
    }
}
