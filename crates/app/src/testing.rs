//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use libcat_domain::author::Author;
use libcat_domain::book::Book;
use libcat_domain::book_instance::{BookInstance, LoanEntry, LoanStatus};
use libcat_domain::error::CatalogError;
use libcat_domain::genre::{Genre, Language};
use libcat_domain::id::{AuthorId, BookId, GenreId, LanguageId, SessionId, UserId};
use libcat_domain::session::Session;
use libcat_domain::user::User;

use crate::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};

#[derive(Default)]
pub struct CatalogData {
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
    pub copies: Vec<BookInstance>,
    pub genres: Vec<Genre>,
    pub languages: Vec<Language>,
    pub users: Vec<User>,
    pub sessions: HashMap<SessionId, Session>,
}

/// Cloneable handle over one shared in-memory dataset.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    data: Arc<Mutex<CatalogData>>,
}

impl InMemoryCatalog {
    pub fn with(&self, f: impl FnOnce(&mut CatalogData)) {
        f(&mut self.data.lock().unwrap());
    }

    fn read<T>(&self, f: impl FnOnce(&CatalogData) -> T) -> T {
        f(&self.data.lock().unwrap())
    }
}

fn window<T>(items: Vec<T>, offset: u64, limit: u64) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(offset).unwrap())
        .take(usize::try_from(limit).unwrap())
        .collect()
}

fn len(n: usize) -> u64 {
    u64::try_from(n).unwrap()
}

impl BookRepository for InMemoryCatalog {
    async fn count(&self) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.books.len())))
    }

    async fn count_title_containing(&self, needle: &str) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.books.iter().filter(|b| b.title.contains(needle)).count())))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Book>, CatalogError> {
        let mut books = self.read(|data| data.books.clone());
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(window(books, offset, limit))
    }

    async fn get_by_id(&self, id: BookId) -> Result<Option<Book>, CatalogError> {
        Ok(self.read(|data| data.books.iter().find(|b| b.id == id).cloned()))
    }

    async fn find_by_author(&self, author_id: AuthorId) -> Result<Vec<Book>, CatalogError> {
        Ok(self.read(|data| {
            data.books
                .iter()
                .filter(|b| b.author_id == Some(author_id))
                .cloned()
                .collect()
        }))
    }
}

impl AuthorRepository for InMemoryCatalog {
    async fn count(&self) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.authors.len())))
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Author>, CatalogError> {
        let mut authors = self.read(|data| data.authors.clone());
        authors.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });
        Ok(window(authors, offset, limit))
    }

    async fn get_by_id(&self, id: AuthorId) -> Result<Option<Author>, CatalogError> {
        Ok(self.read(|data| data.authors.iter().find(|a| a.id == id).cloned()))
    }

    async fn get_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, CatalogError> {
        Ok(self.read(|data| {
            data.authors
                .iter()
                .filter(|a| ids.contains(&a.id))
                .cloned()
                .collect()
        }))
    }
}

impl BookInstanceRepository for InMemoryCatalog {
    async fn count(&self) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.copies.len())))
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.copies.iter().filter(|c| c.status == status).count())))
    }

    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<BookInstance>, CatalogError> {
        Ok(self.read(|data| {
            data.copies
                .iter()
                .filter(|c| c.book_id == book_id)
                .cloned()
                .collect()
        }))
    }

    async fn count_on_loan(&self, borrower: Option<UserId>) -> Result<u64, CatalogError> {
        Ok(self.read(|data| {
            len(data
                .copies
                .iter()
                .filter(|c| on_loan_to(c, borrower))
                .count())
        }))
    }

    async fn find_on_loan(
        &self,
        borrower: Option<UserId>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<LoanEntry>, CatalogError> {
        let mut entries: Vec<LoanEntry> = self.read(|data| {
            data.copies
                .iter()
                .filter(|c| on_loan_to(c, borrower))
                .map(|c| LoanEntry {
                    copy: c.clone(),
                    book_title: data
                        .books
                        .iter()
                        .find(|b| b.id == c.book_id)
                        .map(|b| b.title.clone())
                        .unwrap_or_default(),
                    borrower_username: c.borrower.and_then(|id| {
                        data.users
                            .iter()
                            .find(|u| u.id == id)
                            .map(|u| u.username.clone())
                    }),
                })
                .collect()
        });
        entries.sort_by_key(|entry| entry.copy.due_back);
        Ok(window(entries, offset, limit))
    }
}

fn on_loan_to(copy: &BookInstance, borrower: Option<UserId>) -> bool {
    copy.status == LoanStatus::OnLoan && borrower.is_none_or(|id| copy.borrower == Some(id))
}

impl TagRepository for InMemoryCatalog {
    async fn count_genres_name_containing(&self, needle: &str) -> Result<u64, CatalogError> {
        Ok(self.read(|data| len(data.genres.iter().filter(|g| g.name.contains(needle)).count())))
    }

    async fn genres_by_ids(&self, ids: &[GenreId]) -> Result<Vec<Genre>, CatalogError> {
        let mut genres: Vec<Genre> = self.read(|data| {
            data.genres
                .iter()
                .filter(|g| ids.contains(&g.id))
                .cloned()
                .collect()
        });
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn language_by_id(&self, id: LanguageId) -> Result<Option<Language>, CatalogError> {
        Ok(self.read(|data| data.languages.iter().find(|l| l.id == id).cloned()))
    }
}

impl SessionStore for InMemoryCatalog {
    async fn load(&self, id: SessionId) -> Result<Option<Session>, CatalogError> {
        Ok(self.read(|data| data.sessions.get(&id).cloned()))
    }

    async fn save(&self, session: &Session) -> Result<(), CatalogError> {
        self.with(|data| {
            data.sessions.insert(session.id, session.clone());
        });
        Ok(())
    }
}

impl UserRepository for InMemoryCatalog {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError> {
        Ok(self.read(|data| data.users.iter().find(|u| u.id == id).cloned()))
    }
}
