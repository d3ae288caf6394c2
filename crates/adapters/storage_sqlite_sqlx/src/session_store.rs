//! `SQLite` implementation of [`SessionStore`].
//!
//! Session data is stored as one JSON object per row.

use serde_json::{Map, Value};
use sqlx::SqlitePool;

use libcat_app::ports::SessionStore;
use libcat_domain::error::CatalogError;
use libcat_domain::id::SessionId;
use libcat_domain::session::Session;

use crate::error::StorageError;

const SELECT_BY_ID: &str = "SELECT data FROM sessions WHERE id = ?";
const UPSERT: &str = r"
    INSERT INTO sessions (id, data, updated_at) VALUES (?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
";

/// `SQLite`-backed session store.
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SessionStore for SqliteSessionStore {
    async fn load(&self, id: SessionId) -> Result<Option<Session>, CatalogError> {
        let data: Option<String> = sqlx::query_scalar(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let Some(data) = data else {
            return Ok(None);
        };
        let data: Map<String, Value> = serde_json::from_str(&data).map_err(StorageError::from)?;
        Ok(Some(Session { id, data }))
    }

    async fn save(&self, session: &Session) -> Result<(), CatalogError> {
        let data = serde_json::to_string(&session.data).map_err(StorageError::from)?;

        sqlx::query(UPSERT)
            .bind(session.id.to_string())
            .bind(data)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
