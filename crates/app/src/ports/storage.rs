//! Storage port: read-only repository traits over the catalog records.
//!
//! Substring matching (`*_containing`) is case-sensitive. Listing methods
//! apply their entity's default ordering before `offset`/`limit`.

use std::future::Future;

use libcat_domain::author::Author;
use libcat_domain::book::Book;
use libcat_domain::book_instance::{BookInstance, LoanEntry, LoanStatus};
use libcat_domain::error::CatalogError;
use libcat_domain::genre::{Genre, Language};
use libcat_domain::id::{AuthorId, BookId, GenreId, LanguageId, UserId};

/// Queries over [`Book`]s. Listings are ordered by title.
pub trait BookRepository {
    /// Total number of books.
    fn count(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// Number of books whose title contains `needle`.
    fn count_title_containing(
        &self,
        needle: &str,
    ) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// A slice of all books.
    fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Book>, CatalogError>> + Send;

    /// Get a book by its unique identifier.
    fn get_by_id(
        &self,
        id: BookId,
    ) -> impl Future<Output = Result<Option<Book>, CatalogError>> + Send;

    /// All books credited to `author_id`.
    fn find_by_author(
        &self,
        author_id: AuthorId,
    ) -> impl Future<Output = Result<Vec<Book>, CatalogError>> + Send;
}

/// Queries over [`Author`]s. Listings are ordered by last name, then first name.
pub trait AuthorRepository {
    /// Total number of authors.
    fn count(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// A slice of all authors.
    fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Author>, CatalogError>> + Send;

    /// Get an author by its unique identifier.
    fn get_by_id(
        &self,
        id: AuthorId,
    ) -> impl Future<Output = Result<Option<Author>, CatalogError>> + Send;

    /// The authors among `ids` that exist, in no particular order.
    fn get_by_ids(
        &self,
        ids: &[AuthorId],
    ) -> impl Future<Output = Result<Vec<Author>, CatalogError>> + Send;
}

/// Queries over [`BookInstance`]s. Listings are ordered by due date, earliest first.
pub trait BookInstanceRepository {
    /// Total number of copies.
    fn count(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// Number of copies with exactly `status`.
    fn count_by_status(
        &self,
        status: LoanStatus,
    ) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// All copies of `book_id`.
    fn find_by_book(
        &self,
        book_id: BookId,
    ) -> impl Future<Output = Result<Vec<BookInstance>, CatalogError>> + Send;

    /// Number of on-loan copies, restricted to `borrower` when given.
    fn count_on_loan(
        &self,
        borrower: Option<UserId>,
    ) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// A slice of on-loan copies, restricted to `borrower` when given.
    fn find_on_loan(
        &self,
        borrower: Option<UserId>,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<LoanEntry>, CatalogError>> + Send;
}

/// Queries over the name-only tags: [`Genre`] and [`Language`].
pub trait TagRepository {
    /// Number of genres whose name contains `needle`.
    fn count_genres_name_containing(
        &self,
        needle: &str,
    ) -> impl Future<Output = Result<u64, CatalogError>> + Send;

    /// The genres among `ids` that exist, ordered by name.
    fn genres_by_ids(
        &self,
        ids: &[GenreId],
    ) -> impl Future<Output = Result<Vec<Genre>, CatalogError>> + Send;

    /// Get a language by its unique identifier.
    fn language_by_id(
        &self,
        id: LanguageId,
    ) -> impl Future<Output = Result<Option<Language>, CatalogError>> + Send;
}
