//! Book instance: a loanable physical copy of a [`Book`](crate::book::Book).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::{BookId, BookInstanceId, UserId};
use crate::time::Date;

/// Availability of a copy. Persisted as a single-letter code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    /// Single-letter storage code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Maintenance => "m",
            Self::OnLoan => "o",
            Self::Available => "a",
            Self::Reserved => "r",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance",
            Self::OnLoan => "On loan",
            Self::Available => "Available",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Self::Maintenance),
            "o" => Ok(Self::OnLoan),
            "a" => Ok(Self::Available),
            "r" => Ok(Self::Reserved),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A specific copy that can be borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: BookInstanceId,
    pub book_id: BookId,
    pub imprint: String,
    pub status: LoanStatus,
    pub due_back: Option<Date>,
    pub borrower: Option<UserId>,
}

impl BookInstance {
    /// Create a builder for a copy of `book_id`.
    #[must_use]
    pub fn builder(book_id: BookId) -> BookInstanceBuilder {
        BookInstanceBuilder {
            book_id,
            id: None,
            imprint: None,
            status: LoanStatus::default(),
            due_back: None,
            borrower: None,
        }
    }

    /// Whether the copy should have been returned before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        self.due_back.is_some_and(|due| due < today)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Currently infallible; kept for symmetry with the other entities.
    pub fn validate(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// An on-loan copy joined with the fields loan listings display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanEntry {
    pub copy: BookInstance,
    pub book_title: String,
    pub borrower_username: Option<String>,
}

/// Step-by-step builder for [`BookInstance`].
#[derive(Debug)]
pub struct BookInstanceBuilder {
    book_id: BookId,
    id: Option<BookInstanceId>,
    imprint: Option<String>,
    status: LoanStatus,
    due_back: Option<Date>,
    borrower: Option<UserId>,
}

impl BookInstanceBuilder {
    #[must_use]
    pub fn id(mut self, id: BookInstanceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn imprint(mut self, imprint: impl Into<String>) -> Self {
        self.imprint = Some(imprint.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: LoanStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn due_back(mut self, due_back: Date) -> Self {
        self.due_back = Some(due_back);
        self
    }

    #[must_use]
    pub fn borrower(mut self, borrower: UserId) -> Self {
        self.borrower = Some(borrower);
        self
    }

    /// Consume the builder and return a [`BookInstance`].
    ///
    /// # Errors
    ///
    /// Propagates [`BookInstance::validate`].
    pub fn build(self) -> Result<BookInstance, CatalogError> {
        let instance = BookInstance {
            id: self.id.unwrap_or_default(),
            book_id: self.book_id,
            imprint: self.imprint.unwrap_or_default(),
            status: self.status,
            due_back: self.due_back,
            borrower: self.borrower,
        };
        instance.validate()?;
        Ok(instance)
    }
}
