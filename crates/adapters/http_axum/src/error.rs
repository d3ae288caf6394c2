//! HTTP error response mapping.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use libcat_domain::error::CatalogError;

/// Bytes escaped in the `next` parameter. Slashes stay readable.
const NEXT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Standalone error page.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: &'static str,
    message: String,
}

/// Maps [`CatalogError`] to an HTML response with appropriate status code.
///
/// An [`CatalogError::Unauthenticated`] error becomes a `303` redirect to the
/// login page once [`PageError::login_redirect`] has been attached, and a
/// plain `401` otherwise.
#[derive(Debug)]
pub struct PageError {
    error: CatalogError,
    login: Option<String>,
}

impl PageError {
    /// Send anonymous visitors to `login_url`, asking it to come back to `next`.
    ///
    /// `next` is the full path and query of the refused request; it is
    /// percent-encoded into the login URL.
    #[must_use]
    pub fn login_redirect(mut self, login_url: &str, next: &str) -> Self {
        let next = utf8_percent_encode(next, NEXT_ESCAPE);
        self.login = Some(format!("{login_url}?next={next}"));
        self
    }

    /// The underlying error.
    #[must_use]
    pub fn error(&self) -> &CatalogError {
        &self.error
    }
}

impl From<CatalogError> for PageError {
    fn from(error: CatalogError) -> Self {
        Self { error, login: None }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self.error {
            CatalogError::Unauthenticated => {
                if let Some(target) = self.login {
                    return Redirect::to(&target).into_response();
                }
                (
                    StatusCode::UNAUTHORIZED,
                    "Login required",
                    "you need to be logged in to see this page".to_string(),
                )
            }
            CatalogError::Forbidden { permission } => {
                tracing::debug!(permission, "access denied");
                (
                    StatusCode::FORBIDDEN,
                    "Forbidden",
                    "you do not have permission to see this page".to_string(),
                )
            }
            CatalogError::NotFound(err) => (StatusCode::NOT_FOUND, "Not found", err.to_string()),
            CatalogError::InvalidPage(err) => {
                (StatusCode::NOT_FOUND, "Invalid page", err.to_string())
            }
            CatalogError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "Bad request", err.to_string())
            }
            CatalogError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorTemplate { title, message }
            .render()
            .unwrap_or_else(|_| title.to_string());
        (status, Html(body)).into_response()
    }
}
