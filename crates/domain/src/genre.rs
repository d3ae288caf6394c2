//! Name-only tag entities: [`Genre`] and [`Language`].

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::{GenreId, LanguageId};

/// A book genre such as "Science Fiction".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    /// Create a genre with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self {
            id: GenreId::new(),
            name,
        })
    }
}

/// The natural language a book is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
}

impl Language {
    /// Create a language with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self {
            id: LanguageId::new(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_genre_when_name_provided() {
        let genre = Genre::new("Fantasy").unwrap();
        assert_eq!(genre.name, "Fantasy");
    }

    #[test]
    fn should_reject_empty_language_name() {
        assert!(matches!(
            Language::new(""),
            Err(CatalogError::Validation(ValidationError::EmptyName))
        ));
    }
}
