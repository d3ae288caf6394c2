//! Access rules for gated use-cases.

use libcat_domain::error::CatalogError;
use libcat_domain::user::User;

/// Require a logged-in identity.
///
/// # Errors
///
/// Returns [`CatalogError::Unauthenticated`] when `identity` is `None`.
pub fn require_login(identity: Option<&User>) -> Result<&User, CatalogError> {
    identity.ok_or(CatalogError::Unauthenticated)
}

/// Require a logged-in identity holding `permission`.
///
/// Anonymous callers are sent to log in first; logged-in callers without the
/// permission are refused.
///
/// # Errors
///
/// Returns [`CatalogError::Unauthenticated`] or [`CatalogError::Forbidden`].
pub fn require_permission<'u>(
    identity: Option<&'u User>,
    permission: &'static str,
) -> Result<&'u User, CatalogError> {
    let user = require_login(identity)?;
    if user.has_permission(permission) {
        Ok(user)
    } else {
        Err(CatalogError::Forbidden { permission })
    }
}
