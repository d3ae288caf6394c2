//! Server-side rendered catalog pages (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod authors;
#[allow(clippy::missing_errors_doc)]
pub mod books;
#[allow(clippy::missing_errors_doc)]
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod loans;

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use serde::Deserialize;

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_domain::error::CatalogError;
use libcat_domain::pagination::PageNumber;

use crate::error::PageError;
use crate::state::AppState;

/// `?page=N` query of the listing pages. A missing value means page one.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Parse the requested page; `last` is accepted.
    pub fn number(&self) -> Result<PageNumber, PageError> {
        match self.page.as_deref() {
            None | Some("") => Ok(PageNumber::default()),
            Some(raw) => raw
                .parse()
                .map_err(|err| PageError::from(CatalogError::InvalidPage(err))),
        }
    }
}

/// Build the sub-router for the catalog pages.
pub fn routes<BR, AR, IR, TR, SS, UR>() -> Router<AppState<BR, AR, IR, TR, SS, UR>>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/catalog/") }))
        .route("/catalog/", get(home::index::<BR, AR, IR, TR, SS, UR>))
        .route("/catalog/books/", get(books::list::<BR, AR, IR, TR, SS, UR>))
        .route(
            "/catalog/book/{id}",
            get(books::detail::<BR, AR, IR, TR, SS, UR>),
        )
        .route(
            "/catalog/authors/",
            get(authors::list::<BR, AR, IR, TR, SS, UR>),
        )
        .route(
            "/catalog/author/{id}",
            get(authors::detail::<BR, AR, IR, TR, SS, UR>),
        )
        .route(
            "/catalog/mybooks/",
            get(loans::mine::<BR, AR, IR, TR, SS, UR>),
        )
        .route(
            "/catalog/borrowed/",
            get(loans::all_active::<BR, AR, IR, TR, SS, UR>),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcat_domain::error::InvalidPageError;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn should_default_to_first_page_when_query_missing() {
        assert_eq!(query(None).number().unwrap(), PageNumber::Number(1));
        assert_eq!(query(Some("")).number().unwrap(), PageNumber::Number(1));
    }

    #[test]
    fn should_accept_last_and_numbers() {
        assert_eq!(query(Some("last")).number().unwrap(), PageNumber::Last);
        assert_eq!(query(Some("3")).number().unwrap(), PageNumber::Number(3));
    }

    #[test]
    fn should_reject_garbage_page() {
        let err = query(Some("abc")).number().unwrap_err();
        assert!(matches!(
            err.error(),
            CatalogError::InvalidPage(InvalidPageError::NotANumber(_))
        ));
        let err = query(Some("0")).number().unwrap_err();
        assert!(matches!(
            err.error(),
            CatalogError::InvalidPage(InvalidPageError::LessThanOne)
        ));
    }
}
