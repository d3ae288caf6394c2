//! User: an authenticated identity and the permissions it holds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Permission required to see every active loan.
pub const CAN_MARK_RETURNED: &str = "catalog.can_mark_returned";

/// A library patron or staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub permissions: BTreeSet<String>,
}

impl User {
    /// Create a user with no permissions.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// Grant `permission` and return the user.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}
