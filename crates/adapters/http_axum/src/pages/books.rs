//! Book listing and detail pages.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_app::services::catalog_service::{BookDetail, BookListItem};
use libcat_domain::error::{CatalogError, NotFoundError};
use libcat_domain::id::BookId;
use libcat_domain::pagination::Page;

use super::PageQuery;
use crate::error::PageError;
use crate::session::{Nav, Visit};
use crate::state::AppState;

/// Book list page template.
#[derive(Template)]
#[template(path = "book_list.html")]
pub struct BookListTemplate {
    nav: Nav,
    page: Page<BookListItem>,
}

impl IntoResponse for BookListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Book detail page template.
#[derive(Template)]
#[template(path = "book_detail.html")]
pub struct BookDetailTemplate {
    nav: Nav,
    detail: BookDetail,
}

impl IntoResponse for BookDetailTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Parse a path id; anything that is not a valid key is a missing record.
pub(super) fn parse_id<T: std::str::FromStr>(
    entity: &'static str,
    raw: &str,
) -> Result<T, PageError> {
    raw.parse().map_err(|_| {
        PageError::from(CatalogError::from(NotFoundError {
            entity,
            id: raw.to_string(),
        }))
    })
}

/// `GET /catalog/books/`: five books per page.
pub async fn list<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    Query(query): Query<PageQuery>,
    visit: Visit,
) -> Result<BookListTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let page = state.catalog_service.list_books(query.number()?).await?;
    Ok(BookListTemplate {
        nav: visit.nav,
        page,
    })
}

/// `GET /catalog/book/{id}`: a book with its genres and copies.
pub async fn detail<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    Path(id): Path<String>,
    visit: Visit,
) -> Result<BookDetailTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let id: BookId = parse_id("Book", &id)?;
    let detail = state.catalog_service.get_book(id).await?;
    Ok(BookDetailTemplate {
        nav: visit.nav,
        detail,
    })
}
