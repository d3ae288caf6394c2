//! `SQLite` implementation of [`TagRepository`] (genres and languages).

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use libcat_app::ports::TagRepository;
use libcat_domain::error::CatalogError;
use libcat_domain::genre::{Genre, Language};
use libcat_domain::id::{GenreId, LanguageId};

use crate::error::StorageError;
use crate::{decode_err, to_count};

struct GenreWrapper(Genre);

impl<'r> FromRow<'r, SqliteRow> for GenreWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(Genre {
            id: GenreId::from_str(&id).map_err(decode_err)?,
            name: row.try_get("name")?,
        }))
    }
}

struct LanguageWrapper(Language);

impl<'r> FromRow<'r, SqliteRow> for LanguageWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Self(Language {
            id: LanguageId::from_str(&id).map_err(decode_err)?,
            name: row.try_get("name")?,
        }))
    }
}

const INSERT_GENRE: &str = "INSERT INTO genres (id, name) VALUES (?, ?)";
const INSERT_LANGUAGE: &str = "INSERT INTO languages (id, name) VALUES (?, ?)";
const COUNT_GENRES_CONTAINING: &str = "SELECT COUNT(*) FROM genres WHERE instr(name, ?) > 0";
const SELECT_LANGUAGE_BY_ID: &str = "SELECT * FROM languages WHERE id = ?";

/// `SQLite`-backed genre and language repository.
pub struct SqliteTagRepository {
    pool: SqlitePool,
}

impl SqliteTagRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new genre.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails (e.g. duplicate name).
    pub async fn insert_genre(&self, genre: &Genre) -> Result<(), CatalogError> {
        sqlx::query(INSERT_GENRE)
            .bind(genre.id.to_string())
            .bind(&genre.name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Store a new language.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails (e.g. duplicate name).
    pub async fn insert_language(&self, language: &Language) -> Result<(), CatalogError> {
        sqlx::query(INSERT_LANGUAGE)
            .bind(language.id.to_string())
            .bind(&language.name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl TagRepository for SqliteTagRepository {
    async fn count_genres_name_containing(&self, needle: &str) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_GENRES_CONTAINING)
            .bind(needle)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn genres_by_ids(&self, ids: &[GenreId]) -> Result<Vec<Genre>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM genres WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(") ORDER BY name ASC");

        let rows: Vec<GenreWrapper> = query
            .build_query_as::<GenreWrapper>()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn language_by_id(&self, id: LanguageId) -> Result<Option<Language>, CatalogError> {
        let row: Option<LanguageWrapper> = sqlx::query_as(SELECT_LANGUAGE_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}
