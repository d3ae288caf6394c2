//! Visitor sessions carried by the `sessionid` cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use libcat_app::ports::{
    AuthorRepository, BookInstanceRepository, BookRepository, SessionStore, TagRepository,
    UserRepository,
};
use libcat_domain::id::SessionId;
use libcat_domain::session::Session;
use libcat_domain::user::{CAN_MARK_RETURNED, User};

use crate::error::PageError;
use crate::state::AppState;

/// Name of the cookie holding the session key.
pub const SESSION_COOKIE: &str = "sessionid";

/// Navigation data every page renders in its sidebar.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub username: Option<String>,
    pub can_see_all_loans: bool,
    pub login_url: String,
}

impl Nav {
    fn new(user: Option<&User>, login_url: &str) -> Self {
        Self {
            username: user.map(|u| u.username.clone()),
            can_see_all_loans: user.is_some_and(|u| u.has_permission(CAN_MARK_RETURNED)),
            login_url: login_url.to_string(),
        }
    }
}

/// The visitor behind a request: their session and, if logged in, their user.
///
/// Extracting a `Visit` never writes anything. Handlers that modify the
/// session call [`Visit::persist`] and return the resulting cookie jar.
pub struct Visit {
    pub session: Session,
    pub user: Option<User>,
    pub nav: Nav,
    jar: CookieJar,
}

impl Visit {
    /// Save the session and return the jar carrying its cookie.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] if the session store fails.
    pub async fn persist<BR, AR, IR, TR, SS, UR>(
        self,
        state: &AppState<BR, AR, IR, TR, SS, UR>,
    ) -> Result<CookieJar, PageError>
    where
        SS: SessionStore + Send + Sync + 'static,
        UR: UserRepository + Send + Sync + 'static,
    {
        state.session_service.save(&self.session).await?;
        Ok(self.jar.add(session_cookie(self.session.id)))
    }
}

fn session_cookie(id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

impl<BR, AR, IR, TR, SS, UR> FromRequestParts<AppState<BR, AR, IR, TR, SS, UR>> for Visit
where
    BR: BookRepository + Send + Sync + 'static,
    AR: AuthorRepository + Send + Sync + 'static,
    IR: BookInstanceRepository + Send + Sync + 'static,
    TR: TagRepository + Send + Sync + 'static,
    SS: SessionStore + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
{
    type Rejection = PageError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<BR, AR, IR, TR, SS, UR>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<SessionId>().ok());

        let session = state.session_service.load_or_start(session_id).await?;
        let user = state.session_service.current_user(&session).await?;
        let nav = Nav::new(user.as_ref(), &state.login_url);

        Ok(Self {
            session,
            user,
            nav,
            jar,
        })
    }
}
