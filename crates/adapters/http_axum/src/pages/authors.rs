//! Author listing and detail pages.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_app::services::catalog_service::AuthorDetail;
use libcat_domain::author::Author;
use libcat_domain::id::AuthorId;
use libcat_domain::pagination::Page;

use super::PageQuery;
use super::books::parse_id;
use crate::error::PageError;
use crate::session::{Nav, Visit};
use crate::state::AppState;

/// Author list page template.
#[derive(Template)]
#[template(path = "author_list.html")]
pub struct AuthorListTemplate {
    nav: Nav,
    page: Page<Author>,
}

impl IntoResponse for AuthorListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Author detail page template.
#[derive(Template)]
#[template(path = "author_detail.html")]
pub struct AuthorDetailTemplate {
    nav: Nav,
    detail: AuthorDetail,
}

impl IntoResponse for AuthorDetailTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /catalog/authors/`
pub async fn list<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    Query(query): Query<PageQuery>,
    visit: Visit,
) -> Result<AuthorListTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let page = state.catalog_service.list_authors(query.number()?).await?;
    Ok(AuthorListTemplate {
        nav: visit.nav,
        page,
    })
}

/// `GET /catalog/author/{id}`
pub async fn detail<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    Path(id): Path<String>,
    visit: Visit,
) -> Result<AuthorDetailTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let id: AuthorId = parse_id("Author", &id)?;
    let detail = state.catalog_service.get_author(id).await?;
    Ok(AuthorDetailTemplate {
        nav: visit.nav,
        detail,
    })
}
