//! # libcat-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the port traits defined in `libcat-app::ports`
//!   (record store, session store, user lookup)
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `libcat-app` (for port traits) and `libcat-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod author_repo;
mod book_instance_repo;
mod book_repo;
mod error;
mod pool;
mod session_store;
mod tag_repo;
mod user_repo;

pub use author_repo::SqliteAuthorRepository;
pub use book_instance_repo::SqliteBookInstanceRepository;
pub use book_repo::SqliteBookRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use session_store::SqliteSessionStore;
pub use tag_repo::SqliteTagRepository;
pub use user_repo::SqliteUserRepository;

/// Convert a `COUNT(*)` result, which `SQLite` reports as signed.
fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// Convert an offset/limit for binding, saturating at `i64::MAX`.
fn to_bind(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Wrap a parse failure of a stored column as a decode error.
fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}
