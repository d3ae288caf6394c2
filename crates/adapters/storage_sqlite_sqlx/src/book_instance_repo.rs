//! `SQLite` implementation of [`BookInstanceRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use libcat_app::ports::BookInstanceRepository;
use libcat_domain::book_instance::{BookInstance, LoanEntry, LoanStatus};
use libcat_domain::error::CatalogError;
use libcat_domain::id::{BookId, BookInstanceId, UserId};

use crate::error::StorageError;
use crate::{decode_err, to_bind, to_count};

/// Wrapper for converting database rows into domain [`BookInstance`].
struct Wrapper(BookInstance);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let book_id: String = row.try_get("book_id")?;
        let status: String = row.try_get("status")?;
        let borrower_id: Option<String> = row.try_get("borrower_id")?;

        Ok(Self(BookInstance {
            id: BookInstanceId::from_str(&id).map_err(decode_err)?,
            book_id: BookId::from_str(&book_id).map_err(decode_err)?,
            imprint: row.try_get("imprint")?,
            status: LoanStatus::from_str(&status).map_err(decode_err)?,
            due_back: row.try_get("due_back")?,
            borrower: borrower_id
                .map(|s| UserId::from_str(&s))
                .transpose()
                .map_err(decode_err)?,
        }))
    }
}

/// Row of the loan listing join.
struct LoanWrapper(LoanEntry);

impl<'r> FromRow<'r, SqliteRow> for LoanWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(copy) = Wrapper::from_row(row)?;
        Ok(Self(LoanEntry {
            copy,
            book_title: row.try_get("book_title")?,
            borrower_username: row.try_get("borrower_username")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO book_instances (id, book_id, imprint, status, due_back, borrower_id)
    VALUES (?, ?, ?, ?, ?, ?)
";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM book_instances";
const COUNT_BY_STATUS: &str = "SELECT COUNT(*) FROM book_instances WHERE status = ?";
const SELECT_BY_BOOK: &str = r"
    SELECT * FROM book_instances
    WHERE book_id = ?
    ORDER BY due_back ASC, id ASC
";
// `?2 IS NULL` turns the borrower filter off.
const COUNT_ON_LOAN: &str = r"
    SELECT COUNT(*) FROM book_instances
    WHERE status = ?1 AND (?2 IS NULL OR borrower_id = ?2)
";
const SELECT_ON_LOAN: &str = r"
    SELECT bi.*, b.title AS book_title, u.username AS borrower_username
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
    LEFT JOIN users u ON u.id = bi.borrower_id
    WHERE bi.status = ?1 AND (?2 IS NULL OR bi.borrower_id = ?2)
    ORDER BY bi.due_back ASC, bi.id ASC
    LIMIT ?3 OFFSET ?4
";

/// `SQLite`-backed book instance repository.
pub struct SqliteBookInstanceRepository {
    pool: SqlitePool,
}

impl SqliteBookInstanceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new copy.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails, e.g. when the book or
    /// borrower does not exist.
    pub async fn insert(&self, copy: &BookInstance) -> Result<(), CatalogError> {
        sqlx::query(INSERT)
            .bind(copy.id.to_string())
            .bind(copy.book_id.to_string())
            .bind(&copy.imprint)
            .bind(copy.status.code())
            .bind(copy.due_back)
            .bind(copy.borrower.map(|id| id.to_string()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

impl BookInstanceRepository for SqliteBookInstanceRepository {
    async fn count(&self) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_ALL)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_BY_STATUS)
            .bind(status.code())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<BookInstance>, CatalogError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_BOOK)
            .bind(book_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn count_on_loan(&self, borrower: Option<UserId>) -> Result<u64, CatalogError> {
        let count: i64 = sqlx::query_scalar(COUNT_ON_LOAN)
            .bind(LoanStatus::OnLoan.code())
            .bind(borrower.map(|id| id.to_string()))
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(to_count(count))
    }

    async fn find_on_loan(
        &self,
        borrower: Option<UserId>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<LoanEntry>, CatalogError> {
        let rows: Vec<LoanWrapper> = sqlx::query_as(SELECT_ON_LOAN)
            .bind(LoanStatus::OnLoan.code())
            .bind(borrower.map(|id| id.to_string()))
            .bind(to_bind(limit))
            .bind(to_bind(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
