//! `SQLite` implementation of [`AuthorRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use libcat_app::ports::AuthorRepository;
use libcat_domain::author::Author;
use libcat_domain::error::CatalogError;
use libcat_domain::id::AuthorId;

use crate::error::StorageError;
use crate::{decode_err, to_bind, to_count};

/// Wrapper for converting database rows into domain [`Author`].
struct Wrapper(Author);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Author> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(Author {
            id: AuthorId::from_str(&id).map_err(decode_err)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            date_of_birth: row.try_get("date_of_birth")?,
            date_of_death: row.try_get("date_of_death")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO authors (id, first_name, last_name, date_of_birth, date_of_death)
    VALUES (?, ?, ?, ?, ?)
";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM authors";
const SELECT_PAGE: &str = r"
    SELECT * FROM authors
    ORDER BY last_name ASC, first_name ASC
    LIMIT ? OFFSET ?
";
const SELECT_BY_ID: &str = "SELECT * FROM authors WHERE id = ?";

/// `SQLite`-backed author repository.
pub struct SqliteAuthorRepository {
    pool: SqlitePool,
}

impl SqliteAuthorRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new author.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails.
    pub async fn insert(&self, author: &Author) -> Result<(), CatalogError> {
        sqlx::query(INSERT)
            .bind(author.id.to_string())
            .bind(&author.first_name)
            .bind(&author.last_name)
            .bind(author.date_of_birth)
            .bind(author.date_of_death)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl AuthorRepository for SqliteAuthorRepository {
    async fn count(&self) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_ALL)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Author>, CatalogError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(to_bind(limit))
            .bind(to_bind(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_by_id(&self, id: AuthorId) -> Result<Option<Author>, CatalogError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM authors WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows: Vec<Wrapper> = query
            .build_query_as::<Wrapper>()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
