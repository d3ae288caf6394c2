//! Session service: visitor sessions and the identity they carry.

use libcat_domain::error::CatalogError;
use libcat_domain::id::SessionId;
use libcat_domain::session::Session;
use libcat_domain::user::User;

use crate::ports::{SessionStore, UserRepository};

/// Loads and persists sessions and resolves the logged-in user.
pub struct SessionService<SS, UR> {
    store: SS,
    users: UR,
}

impl<SS, UR> SessionService<SS, UR>
where
    SS: SessionStore + Send + Sync,
    UR: UserRepository + Send + Sync,
{
    /// Create a new service backed by the given session store and user repository.
    pub fn new(store: SS, users: UR) -> Self {
        Self { store, users }
    }

    /// Load the session named by the visitor's key, or start a new one when
    /// the key is missing or unknown.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the session store.
    #[tracing::instrument(skip(self))]
    pub async fn load_or_start(&self, id: Option<SessionId>) -> Result<Session, CatalogError> {
        if let Some(id) = id {
            if let Some(session) = self.store.load(id).await? {
                return Ok(session);
            }
            tracing::debug!(%id, "unknown session key, starting a new session");
        }
        Ok(Session::new())
    }

    /// Persist `session` under its id.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the session store.
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn save(&self, session: &Session) -> Result<(), CatalogError> {
        self.store.save(session).await
    }

    /// The user logged in through `session`, if any.
    ///
    /// A session pointing at a user that no longer exists is treated as
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from the user repository.
    #[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
    pub async fn current_user(&self, session: &Session) -> Result<Option<User>, CatalogError> {
        match session.user_id() {
            Some(user_id) => self.users.get_by_id(user_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryCatalog;
    use libcat_domain::session::NUM_VISITS_KEY;

    fn make_service() -> (SessionService<InMemoryCatalog, InMemoryCatalog>, InMemoryCatalog) {
        let store = InMemoryCatalog::default();
        (SessionService::new(store.clone(), store.clone()), store)
    }

    #[tokio::test]
    async fn should_start_new_session_when_no_key() {
        let (svc, _) = make_service();
        let session = svc.load_or_start(None).await.unwrap();
        assert!(session.data.is_empty());
    }

    #[tokio::test]
    async fn should_start_new_session_when_key_unknown() {
        let (svc, _) = make_service();
        let stale = SessionId::new();
        let session = svc.load_or_start(Some(stale)).await.unwrap();
        assert_ne!(session.id, stale);
    }

    #[tokio::test]
    async fn should_reload_saved_session() {
        let (svc, _) = make_service();
        let mut session = Session::new();
        session.set(NUM_VISITS_KEY, 4_u64).unwrap();
        svc.save(&session).await.unwrap();

        let loaded = svc.load_or_start(Some(session.id)).await.unwrap();
        assert_eq!(loaded.get_or(NUM_VISITS_KEY, 0_u64), 4);
    }

    #[tokio::test]
    async fn should_resolve_logged_in_user() {
        let (svc, store) = make_service();
        let alice = User::new("alice");
        store.with(|data| data.users.push(alice.clone()));

        let mut session = Session::new();
        session.login(alice.id);

        let user = svc.current_user(&session).await.unwrap();
        assert_eq!(user, Some(alice));
    }

    #[tokio::test]
    async fn should_treat_anonymous_session_as_no_user() {
        let (svc, _) = make_service();
        let user = svc.current_user(&Session::new()).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn should_treat_deleted_user_as_anonymous() {
        let (svc, _) = make_service();
        let mut session = Session::new();
        session.login(libcat_domain::id::UserId::new());

        let user = svc.current_user(&session).await.unwrap();
        assert!(user.is_none());
    }
}
