//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CatalogError`]
//! via `#[from]` or an explicit `From` impl (see the storage adapter).

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    InvalidPage(#[from] InvalidPageError),

    /// The operation needs a logged-in identity.
    #[error("authentication required")]
    Unauthenticated,

    /// The identity lacks the permission named here.
    #[error("permission denied: {permission}")]
    Forbidden { permission: &'static str },

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("unknown loan status code {0:?}")]
    UnknownStatus(String),

    #[error("date of death precedes date of birth")]
    DeathBeforeBirth,

    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A record looked up by id does not exist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A requested page is outside the listing or could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidPageError {
    #[error("page number {0:?} is not an integer")]
    NotANumber(String),

    #[error("page number is less than 1")]
    LessThanOne,

    #[error("page {requested} contains no results (last page is {last})")]
    Empty { requested: u64, last: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: CatalogError = ValidationError::EmptyTitle.into();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn should_describe_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Book",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Book 42 not found");
    }

    #[test]
    fn should_name_permission_when_forbidden() {
        let err = CatalogError::Forbidden {
            permission: "catalog.can_mark_returned",
        };
        assert_eq!(
            err.to_string(),
            "permission denied: catalog.can_mark_returned"
        );
    }
}
