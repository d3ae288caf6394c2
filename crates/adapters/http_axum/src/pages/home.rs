//! Catalog home page: collection counts and the visit counter.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_app::services::catalog_service::HomeStats;

use crate::error::PageError;
use crate::session::{Nav, Visit};
use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    nav: Nav,
    num_books: u64,
    num_instances: u64,
    num_instances_available: u64,
    num_authors: u64,
    num_books_contain_war: u64,
    num_genres_contain_fiction: u64,
    num_visits: u64,
}

impl HomeTemplate {
    /// The genre slot carries the title count. The genre count from
    /// [`HomeStats`] is only logged.
    fn new(nav: Nav, stats: &HomeStats) -> Self {
        Self {
            nav,
            num_books: stats.num_books,
            num_instances: stats.num_instances,
            num_instances_available: stats.num_instances_available,
            num_authors: stats.num_authors,
            num_books_contain_war: stats.num_books_contain_war,
            num_genres_contain_fiction: stats.num_books_contain_war,
            num_visits: stats.num_visits,
        }
    }
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /catalog/`: counts and the visitor's previous number of visits.
pub async fn index<BR, AR, IR, TR, SS, UR>(
    State(state): State<AppState<BR, AR, IR, TR, SS, UR>>,
    mut visit: Visit,
) -> Result<(CookieJar, HomeTemplate), PageError>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    let stats = state
        .catalog_service
        .compute_home_stats(&mut visit.session)
        .await?;
    tracing::debug!(
        num_genres_contain_fiction = stats.num_genres_contain_fiction,
        "genre count computed"
    );

    let template = HomeTemplate::new(visit.nav.clone(), &stats);
    let jar = visit.persist(&state).await?;
    Ok((jar, template))
}
