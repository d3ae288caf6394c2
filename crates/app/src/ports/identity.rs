//! Identity port: who a user is and what they may do.

use std::future::Future;

use libcat_domain::error::CatalogError;
use libcat_domain::id::UserId;
use libcat_domain::user::User;

/// Lookup of [`User`]s together with their permissions.
pub trait UserRepository {
    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, CatalogError>> + Send;
}
