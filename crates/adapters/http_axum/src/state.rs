//! Shared application state for axum handlers.

use std::sync::Arc;

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_app::services::catalog_service::CatalogService;
use libcat_app::services::session_service::SessionService;

/// Where anonymous visitors are sent when a page needs a login.
pub const DEFAULT_LOGIN_URL: &str = "/accounts/login/";

/// Application state shared across all axum handlers.
///
/// Generic over the repository types and session store to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<BR, AR, IR, TR, SS, UR> {
    /// Read-only catalog use-cases.
    pub catalog_service: Arc<CatalogService<BR, AR, IR, TR>>,
    /// Session persistence and identity lookup.
    pub session_service: Arc<SessionService<SS, UR>>,
    /// Login page for the redirect of anonymous visitors.
    pub login_url: Arc<str>,
}

impl<BR, AR, IR, TR, SS, UR> Clone for AppState<BR, AR, IR, TR, SS, UR> {
    fn clone(&self) -> Self {
        Self {
            catalog_service: Arc::clone(&self.catalog_service),
            session_service: Arc::clone(&self.session_service),
            login_url: Arc::clone(&self.login_url),
        }
    }
}

impl<BR, AR, IR, TR, SS, UR> AppState<BR, AR, IR, TR, SS, UR>
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        catalog_service: CatalogService<BR, AR, IR, TR>,
        session_service: SessionService<SS, UR>,
    ) -> Self {
        Self {
            catalog_service: Arc::new(catalog_service),
            session_service: Arc::new(session_service),
            login_url: Arc::from(DEFAULT_LOGIN_URL),
        }
    }

    /// Send anonymous visitors to `login_url` instead of the default.
    #[must_use]
    pub fn with_login_url(mut self, login_url: impl AsRef<str>) -> Self {
        self.login_url = Arc::from(login_url.as_ref());
        self
    }
}
