//! SQLite storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use qlueless_types::{NewVenture, Venture};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;

const VENTURE_COLUMNS: &str = "id, last_modified, description, order_ids, state, is_alive, extra";

/// SQLite-backed venture storage
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if missing) the database and initialize schema
    pub async fn new(
        url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        let mut pool_options =
            SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(connect_timeout_secs));

        // Each connection to an in-memory database sees its own database.
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(max_connections);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let storage = Self { pool };
        storage.initialize_schema().await?;
        Ok(storage)
    }

    async fn initialize_schema(&self) -> Result<(), StorageError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS venture (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                last_modified INTEGER NOT NULL,
                description TEXT NOT NULL,
                order_ids TEXT NOT NULL DEFAULT '',
                state TEXT NOT NULL,
                is_alive BOOLEAN NOT NULL,
                extra TEXT NOT NULL DEFAULT ''
            );
            "#,
            r#"
            CREATE VIEW IF NOT EXISTS ql_venture AS
                SELECT id, last_modified, description, order_ids, state, is_alive, extra
                FROM venture
                WHERE is_alive = TRUE;
            "#,
        ];

        for stmt in statements {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
        }

        Ok(())
    }

    fn map_venture(row: &SqliteRow) -> StorageResult<Venture> {
        let read = |e: sqlx::Error| StorageError::InvalidData(e.to_string());
        Ok(Venture {
            id: row.try_get::<i64, _>("id").map_err(read)?.to_string(),
            last_modified: row.try_get("last_modified").map_err(read)?,
            description: row.try_get("description").map_err(read)?,
            order_ids: row.try_get("order_ids").map_err(read)?,
            state: row.try_get("state").map_err(read)?,
            is_alive: row.try_get("is_alive").map_err(read)?,
            extra: row.try_get("extra").map_err(read)?,
        })
    }
}

#[async_trait]
impl VentureStorage for SqliteStorage {
    async fn insert_venture(&self, new: NewVenture) -> StorageResult<Venture> {
        let last_modified = now_millis();
        let result = sqlx::query(
            r#"
            INSERT INTO venture (last_modified, description, order_ids, state, is_alive, extra)
            VALUES (?, ?, ?, ?, TRUE, ?)
            "#,
        )
        .bind(last_modified)
        .bind(&new.description)
        .bind(&new.order_ids)
        .bind(&new.state)
        .bind(&new.extra)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        let id = result.last_insert_rowid();
        Ok(new.into_venture(id.to_string(), last_modified))
    }

    async fn get_venture(&self, id: &str) -> StorageResult<Option<Venture>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!("SELECT {} FROM venture WHERE id = ?", VENTURE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        row.as_ref().map(Self::map_venture).transpose()
    }

    async fn list_living_ventures(&self) -> StorageResult<Vec<Venture>> {
        let rows = sqlx::query(&format!("SELECT {} FROM ql_venture ORDER BY id", VENTURE_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        rows.iter().map(Self::map_venture).collect()
    }

    async fn list_ventures(&self, ids: &[String]) -> StorageResult<Vec<Venture>> {
        let ids: Vec<i64> = ids.iter().filter_map(|id| parse_id(id)).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM venture WHERE id IN (", VENTURE_COLUMNS));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(") ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        rows.iter().map(Self::map_venture).collect()
    }

    async fn update_venture(&self, mut venture: Venture) -> StorageResult<Venture> {
        let id = parse_id(&venture.id)
            .ok_or_else(|| StorageError::NotFound(format!("Venture {}", venture.id)))?;
        venture.last_modified = now_millis();

        let result = sqlx::query(
            r#"
            UPDATE venture
            SET last_modified = ?, description = ?, order_ids = ?, state = ?, is_alive = ?, extra = ?
            WHERE id = ?
            "#,
        )
        .bind(venture.last_modified)
        .bind(&venture.description)
        .bind(&venture.order_ids)
        .bind(&venture.state)
        .bind(venture.is_alive)
        .bind(&venture.extra)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Venture {}", venture.id)));
        }

        Ok(venture)
    }
}
