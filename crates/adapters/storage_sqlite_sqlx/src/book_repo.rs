//! `SQLite` implementation of [`BookRepository`].
//!
//! Genre links live in `book_genres`; they are loaded with one extra query
//! per call and attached to the rows.

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use libcat_app::ports::BookRepository;
use libcat_domain::book::Book;
use libcat_domain::error::CatalogError;
use libcat_domain::id::{AuthorId, BookId, GenreId, LanguageId};

use crate::error::StorageError;
use crate::{decode_err, to_bind, to_count};

/// Wrapper for converting database rows into domain [`Book`] (without genres).
struct Wrapper(Book);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let author_id: Option<String> = row.try_get("author_id")?;
        let language_id: Option<String> = row.try_get("language_id")?;

        Ok(Self(Book {
            id: BookId::from_str(&id).map_err(decode_err)?,
            title: row.try_get("title")?,
            author_id: author_id
                .map(|s| AuthorId::from_str(&s))
                .transpose()
                .map_err(decode_err)?,
            summary: row.try_get("summary")?,
            isbn: row.try_get("isbn")?,
            genre_ids: Vec::new(),
            language_id: language_id
                .map(|s| LanguageId::from_str(&s))
                .transpose()
                .map_err(decode_err)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO books (id, title, author_id, summary, isbn, language_id)
    VALUES (?, ?, ?, ?, ?, ?)
";
const INSERT_GENRE_LINK: &str = "INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM books";
// instr() is case-sensitive, unlike LIKE.
const COUNT_TITLE_CONTAINING: &str = "SELECT COUNT(*) FROM books WHERE instr(title, ?) > 0";
const SELECT_PAGE: &str = "SELECT * FROM books ORDER BY title ASC, id ASC LIMIT ? OFFSET ?";
const SELECT_BY_ID: &str = "SELECT * FROM books WHERE id = ?";
const SELECT_BY_AUTHOR: &str = "SELECT * FROM books WHERE author_id = ? ORDER BY title ASC";

/// `SQLite`-backed book repository.
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new book together with its genre links.
    ///
    /// # Errors
    ///
    /// Returns a storage error if an insert fails, e.g. when the author,
    /// language or a genre does not exist.
    pub async fn insert(&self, book: &Book) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(INSERT)
            .bind(book.id.to_string())
            .bind(&book.title)
            .bind(book.author_id.map(|id| id.to_string()))
            .bind(&book.summary)
            .bind(&book.isbn)
            .bind(book.language_id.map(|id| id.to_string()))
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        for genre_id in &book.genre_ids {
            sqlx::query(INSERT_GENRE_LINK)
                .bind(book.id.to_string())
                .bind(genre_id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn with_genres(&self, rows: Vec<Wrapper>) -> Result<Vec<Book>, StorageError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT book_id, genre_id FROM book_genres WHERE book_id IN (");
        let mut separated = query.separated(", ");
        for row in &rows {
            separated.push_bind(row.0.id.to_string());
        }
        separated.push_unseparated(")");

        let links: Vec<(String, String)> = query
            .build_query_as::<(String, String)>()
            .fetch_all(&self.pool)
            .await?;

        let mut by_book: HashMap<BookId, Vec<GenreId>> = HashMap::new();
        for (book_id, genre_id) in links {
            let book_id = BookId::from_str(&book_id).map_err(decode_err)?;
            let genre_id = GenreId::from_str(&genre_id).map_err(decode_err)?;
            by_book.entry(book_id).or_default().push(genre_id);
        }

        Ok(rows
            .into_iter()
            .map(|Wrapper(mut book)| {
                book.genre_ids = by_book.remove(&book.id).unwrap_or_default();
                book
            })
            .collect())
    }
}

impl BookRepository for SqliteBookRepository {
    async fn count(&self) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_ALL)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn count_title_containing(&self, needle: &str) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_TITLE_CONTAINING)
            .bind(needle)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Book>, CatalogError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(to_bind(limit))
            .bind(to_bind(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(self.with_genres(rows).await?)
    }

    async fn get_by_id(&self, id: BookId) -> Result<Option<Book>, CatalogError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let books = self.with_genres(row.into_iter().collect()).await?;
        Ok(books.into_iter().next())
    }

    async fn find_by_author(&self, author_id: AuthorId) -> Result<Vec<Book>, CatalogError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_AUTHOR)
            .bind(author_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(self.with_genres(rows).await?)
    }
}
