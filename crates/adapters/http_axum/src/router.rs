//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges the catalog pages at `/` with a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<BR, AR, IR, TR, SS, UR>(state: AppState<BR, AR, IR, TR, SS, UR>) -> Router
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::pages::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
