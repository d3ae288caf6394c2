//! Book: a catalogued title (not a specific copy).

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::{AuthorId, BookId, GenreId, LanguageId};

/// A title in the catalog. Physical copies are [`BookInstance`](crate::book_instance::BookInstance)s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// `None` once the author record has been removed.
    pub author_id: Option<AuthorId>,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<GenreId>,
    pub language_id: Option<LanguageId>,
}

impl Book {
    /// Create a builder for constructing a [`Book`].
    #[must_use]
    pub fn builder() -> BookBuilder {
        BookBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when `title` is empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Book`].
#[derive(Debug, Default)]
pub struct BookBuilder {
    id: Option<BookId>,
    title: Option<String>,
    author_id: Option<AuthorId>,
    summary: Option<String>,
    isbn: Option<String>,
    genre_ids: Vec<GenreId>,
    language_id: Option<LanguageId>,
}

impl BookBuilder {
    #[must_use]
    pub fn id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn author_id(mut self, author_id: AuthorId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    #[must_use]
    pub fn genre(mut self, genre_id: GenreId) -> Self {
        self.genre_ids.push(genre_id);
        self
    }

    #[must_use]
    pub fn language_id(mut self, language_id: LanguageId) -> Self {
        self.language_id = Some(language_id);
        self
    }

    /// Consume the builder, validate, and return a [`Book`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `title` is missing or empty.
    pub fn build(self) -> Result<Book, CatalogError> {
        let book = Book {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            author_id: self.author_id,
            summary: self.summary.unwrap_or_default(),
            isbn: self.isbn.unwrap_or_default(),
            genre_ids: self.genre_ids,
            language_id: self.language_id,
        };
        book.validate()?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_book_with_genres() {
        let fantasy = GenreId::new();
        let adventure = GenreId::new();
        let book = Book::builder()
            .title("The Hobbit")
            .genre(fantasy)
            .genre(adventure)
            .build()
            .unwrap();

        assert_eq!(book.genre_ids, vec![fantasy, adventure]);
        assert!(book.author_id.is_none());
    }

    #[test]
    fn should_return_validation_error_when_title_missing() {
        let result = Book::builder().isbn("9780261102217").build();
        assert!(matches!(
            result,
            Err(CatalogError::Validation(ValidationError::EmptyTitle))
        ));
    }
}
