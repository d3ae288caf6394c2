//! Session store port: persistence for visitor sessions.

use std::future::Future;

use libcat_domain::error::CatalogError;
use libcat_domain::id::SessionId;
use libcat_domain::session::Session;

/// Keyed storage for [`Session`]s.
pub trait SessionStore {
    /// Load a session, or `None` when the key is unknown.
    fn load(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Session>, CatalogError>> + Send;

    /// Insert or replace the session under its id.
    fn save(&self, session: &Session) -> impl Future<Output = Result<(), CatalogError>> + Send;
}
