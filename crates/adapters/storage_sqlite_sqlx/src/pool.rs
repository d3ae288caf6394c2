//! Opening the catalog database.
//!
//! File databases run in WAL mode so page renders can read while a session
//! is written. An in-memory database lives only as long as one of its
//! connections does, so it is served by a single connection that is never
//! recycled.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:libcat.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Open the database, creating the file if missing, and bring the schema
    /// up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed, the connection fails
    /// or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let in_memory = is_in_memory(&self.database_url);
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(url = %self.database_url, in_memory, "catalog database ready");

        Ok(Database { pool })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// An open catalog database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Borrow the connection pool, to be cloned into each repository.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
