//! Catalog service: home statistics, listings, detail pages, and loans.

use libcat_domain::author::Author;
use libcat_domain::book::Book;
use libcat_domain::book_instance::{BookInstance, LoanEntry, LoanStatus};
use libcat_domain::error::{CatalogError, NotFoundError};
use libcat_domain::genre::{Genre, Language};
use libcat_domain::id::{AuthorId, BookId};
use libcat_domain::pagination::{Page, PageNumber, PageRequest};
use libcat_domain::session::{NUM_VISITS_KEY, Session};
use libcat_domain::user::{CAN_MARK_RETURNED, User};
use serde::Serialize;

use crate::access::{require_login, require_permission};
use crate::ports::{AuthorRepository, BookInstanceRepository, BookRepository, TagRepository};

/// Books per page in the book listing.
pub const BOOKS_PAGE_SIZE: u64 = 5;

/// Loans per page in the "my borrowed books" listing.
pub const MY_LOANS_PAGE_SIZE: u64 = 10;

/// Page size for listings without a fixed one (authors, all loans).
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Title substring counted on the home page.
pub const TITLE_NEEDLE: &str = "war";

/// Genre-name substring counted on the home page.
pub const GENRE_NEEDLE: &str = "fiction";

/// Counters shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeStats {
    pub num_books: u64,
    pub num_instances: u64,
    pub num_instances_available: u64,
    pub num_authors: u64,
    pub num_books_contain_war: u64,
    pub num_genres_contain_fiction: u64,
    /// Visits of this session before the current one.
    pub num_visits: u64,
}

/// A book row in the listing, with its author resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListItem {
    pub book: Book,
    pub author: Option<Author>,
}

/// Everything the book detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub language: Option<Language>,
    pub copies: Vec<BookInstance>,
}

/// Everything the author detail page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

/// Read-only use-cases over the catalog.
pub struct CatalogService<BR, AR, IR, TR> {
    books: BR,
    authors: AR,
    copies: IR,
    tags: TR,
    default_page_size: u64,
}

impl<BR, AR, IR, TR> CatalogService<BR, AR, IR, TR>
where
    BR: BookRepository + Send + Sync,
    AR: AuthorRepository + Send + Sync,
    IR: BookInstanceRepository + Send + Sync,
    TR: TagRepository + Send + Sync,
{
    /// Create a new service backed by the given repositories.
    pub fn new(books: BR, authors: AR, copies: IR, tags: TR) -> Self {
        Self {
            books,
            authors,
            copies,
            tags,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size used by listings without a fixed one.
    /// Zero is ignored.
    #[must_use]
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        if size > 0 {
            self.default_page_size = size;
        }
        self
    }

    /// Gather the home page counters and count this visit in `session`.
    ///
    /// The returned `num_visits` is the value before this visit; the session
    /// now holds that value plus one. Persisting the session is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the repositories.
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn compute_home_stats(&self, session: &mut Session) -> Result<HomeStats, CatalogError> {
        let num_books = self.books.count().await?;
        let num_instances = self.copies.count().await?;
        let num_instances_available = self.copies.count_by_status(LoanStatus::Available).await?;
        let num_authors = self.authors.count().await?;
        let num_books_contain_war = self.books.count_title_containing(TITLE_NEEDLE).await?;
        let num_genres_contain_fiction = self
            .tags
            .count_genres_name_containing(GENRE_NEEDLE)
            .await?;

        let num_visits: u64 = session.get_or(NUM_VISITS_KEY, 0);
        session
            .set(NUM_VISITS_KEY, num_visits + 1)
            .map_err(|err| CatalogError::Storage(Box::new(err)))?;

        Ok(HomeStats {
            num_books,
            num_instances,
            num_instances_available,
            num_authors,
            num_books_contain_war,
            num_genres_contain_fiction,
            num_visits,
        })
    }

    /// One page of books, ordered by title, five per page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPage`] for pages past the end, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn list_books(&self, page: PageNumber) -> Result<Page<BookListItem>, CatalogError> {
        let total = self.books.count().await?;
        let window = PageRequest::new(page, BOOKS_PAGE_SIZE)?.resolve(total)?;
        let books = self.books.list(window.offset, window.limit).await?;

        let author_ids: Vec<AuthorId> = books.iter().filter_map(|b| b.author_id).collect();
        let authors = if author_ids.is_empty() {
            Vec::new()
        } else {
            self.authors.get_by_ids(&author_ids).await?
        };

        let items = books
            .into_iter()
            .map(|book| {
                let author = book
                    .author_id
                    .and_then(|id| authors.iter().find(|a| a.id == id).cloned());
                BookListItem { book, author }
            })
            .collect();
        Ok(Page::new(items, window, total))
    }

    /// One page of authors, ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPage`] for pages past the end, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_authors(&self, page: PageNumber) -> Result<Page<Author>, CatalogError> {
        let total = self.authors.count().await?;
        let window = PageRequest::new(page, self.default_page_size)?.resolve(total)?;
        let authors = self.authors.list(window.offset, window.limit).await?;
        Ok(Page::new(authors, window, total))
    }

    /// A book with its author, genres, language and copies.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no book with `id` exists,
    /// or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn get_book(&self, id: BookId) -> Result<BookDetail, CatalogError> {
        let book = self.books.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Book",
            id: id.to_string(),
        })?;

        let author = match book.author_id {
            Some(author_id) => self.authors.get_by_id(author_id).await?,
            None => None,
        };
        let genres = if book.genre_ids.is_empty() {
            Vec::new()
        } else {
            self.tags.genres_by_ids(&book.genre_ids).await?
        };
        let language = match book.language_id {
            Some(language_id) => self.tags.language_by_id(language_id).await?,
            None => None,
        };
        let copies = self.copies.find_by_book(id).await?;

        Ok(BookDetail {
            book,
            author,
            genres,
            language,
            copies,
        })
    }

    /// An author with the books credited to them.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no author with `id` exists,
    /// or a storage error from the repositories.
    #[tracing::instrument(skip(self))]
    pub async fn get_author(&self, id: AuthorId) -> Result<AuthorDetail, CatalogError> {
        let author = self.authors.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Author",
            id: id.to_string(),
        })?;
        let books = self.books.find_by_author(id).await?;
        Ok(AuthorDetail { author, books })
    }

    /// Copies on loan to `identity`, earliest due first, ten per page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] when `identity` is `None`,
    /// [`CatalogError::InvalidPage`] for pages past the end, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, identity))]
    pub async fn list_loans_for_user(
        &self,
        identity: Option<&User>,
        page: PageNumber,
    ) -> Result<Page<LoanEntry>, CatalogError> {
        let user = require_login(identity)?;
        self.loans_page(Some(user), page, MY_LOANS_PAGE_SIZE).await
    }

    /// Every copy on loan, earliest due first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthenticated`] for anonymous callers,
    /// [`CatalogError::Forbidden`] when `identity` lacks
    /// `catalog.can_mark_returned`, [`CatalogError::InvalidPage`] for pages
    /// past the end, or a storage error from the repository.
    #[tracing::instrument(skip(self, identity))]
    pub async fn list_all_active_loans(
        &self,
        identity: Option<&User>,
        page: PageNumber,
    ) -> Result<Page<LoanEntry>, CatalogError> {
        require_permission(identity, CAN_MARK_RETURNED)?;
        self.loans_page(None, page, self.default_page_size).await
    }

    async fn loans_page(
        &self,
        borrower: Option<&User>,
        page: PageNumber,
        size: u64,
    ) -> Result<Page<LoanEntry>, CatalogError> {
        let borrower = borrower.map(|user| user.id);
        let total = self.copies.count_on_loan(borrower).await?;
        let window = PageRequest::new(page, size)?.resolve(total)?;
        let loans = self
            .copies
            .find_on_loan(borrower, window.offset, window.limit)
            .await?;
        Ok(Page::new(loans, window, total))
    }
}
