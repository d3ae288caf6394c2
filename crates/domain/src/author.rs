//! Author: a person credited with one or more books.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::AuthorId;
use crate::time::Date;

/// A book author with optional life dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

impl Author {
    /// Create a builder for constructing an [`Author`].
    #[must_use]
    pub fn builder() -> AuthorBuilder {
        AuthorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when either name is empty or the
    /// date of death precedes the date of birth.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let (Some(born), Some(died)) = (self.date_of_birth, self.date_of_death) {
            if died < born {
                return Err(ValidationError::DeathBeforeBirth.into());
            }
        }
        Ok(())
    }
}

/// Renders as `"last, first"`, the form used in listings.
impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// Step-by-step builder for [`Author`].
#[derive(Debug, Default)]
pub struct AuthorBuilder {
    id: Option<AuthorId>,
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<Date>,
    date_of_death: Option<Date>,
}

impl AuthorBuilder {
    #[must_use]
    pub fn id(mut self, id: AuthorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date: Date) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    #[must_use]
    pub fn date_of_death(mut self, date: Date) -> Self {
        self.date_of_death = Some(date);
        self
    }

    /// Consume the builder, validate, and return an [`Author`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if a name is missing or the
    /// life dates are inverted.
    pub fn build(self) -> Result<Author, CatalogError> {
        let author = Author {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        };
        author.validate()?;
        Ok(author)
    }
}
