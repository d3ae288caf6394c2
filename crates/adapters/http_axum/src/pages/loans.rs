//! Loan listings: the visitor's own loans and, for librarians, every loan.

use askama::Template;
use axum::extract::{OriginalUri, Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Response};

use libcat_app::access::{require_login, require_permission};
use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_domain::book_instance::LoanEntry;
use libcat_domain::error::CatalogError;
use libcat_domain::pagination::Page;
use libcat_domain::time::{Date, today};
use libcat_domain::user::CAN_MARK_RETURNED;

use super::PageQuery;
use crate::error::PageError;
use crate::session::{Nav, Visit};
use crate::state::AppState;

/// One rendered loan row.
pub struct LoanRow {
    pub entry: LoanEntry,
    pub overdue: bool,
}

impl LoanRow {
    fn new(entry: LoanEntry, today: Date) -> Self {
        let overdue = entry.copy.is_overdue(today);
        Self { entry, overdue }
    }
}

/// Turn a refusal into a login redirect that brings the visitor back to `uri`.
fn refuse(login_url: &str, uri: &Uri) -> impl Fn(CatalogError) -> PageError {
    let next = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let login_url = login_url.to_string();
    move |err| PageError::from(err).login_redirect(&login_url, &next)
}

/// "My borrowed books" page template.
#[derive(Template)]
#[template(path = "my_loans.html")]
pub struct MyLoansTemplate {
    nav: Nav,
    page: Page<LoanRow>,
}

impl IntoResponse for MyLoansTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// "All borrowed books" page template.
#[derive(Template)]
#[template(path = "all_loans.html")]
pub struct AllLoansTemplate {
    nav: Nav,
    page: Page<LoanRow>,
}

impl IntoResponse for AllLoansTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /catalog/mybooks/`: loans of the logged-in visitor.
pub async fn mine<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
    visit: Visit,
) -> Result<MyLoansTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let refused = refuse(&state.login_url, &uri);
    // access comes before the page number, so a bad page still asks for login
    require_login(visit.user.as_ref()).map_err(&refused)?;
    let page = state
        .catalog_service
        .list_loans_for_user(visit.user.as_ref(), query.number()?)
        .await
        .map_err(&refused)?;

    let today = today();
    Ok(MyLoansTemplate {
        nav: visit.nav,
        page: page.map(|entry| LoanRow::new(entry, today)),
    })
}

/// `GET /catalog/borrowed/`: every loan, for holders of
/// `catalog.can_mark_returned`.
pub async fn all_active<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
    visit: Visit,
) -> Result<AllLoansTemplate, PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let refused = refuse(&state.login_url, &uri);
    require_permission(visit.user.as_ref(), CAN_MARK_RETURNED).map_err(&refused)?;
    let page = state
        .catalog_service
        .list_all_active_loans(visit.user.as_ref(), query.number()?)
        .await
        .map_err(&refused)?;

    let today = today();
    Ok(AllLoansTemplate {
        nav: visit.nav,
        page: page.map(|entry| LoanRow::new(entry, today)),
    })
}
