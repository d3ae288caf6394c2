//! Session: per-visitor key/value state carried across requests.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::id::{SessionId, UserId};

/// Session key holding the visit counter of the home page.
pub const NUM_VISITS_KEY: &str = "num_visits";

/// Session key holding the logged-in user id.
pub const AUTH_USER_KEY: &str = "_auth_user_id";

/// A visitor session. Values are stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub data: Map<String, Value>,
}

impl Session {
    /// Start an empty session with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `key`, falling back to `default` when it is absent or has an
    /// incompatible type.
    #[must_use]
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.data
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `value` cannot be represented as JSON.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), serde_json::Error> {
        self.data.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// The user logged in through this session, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.data
            .get(AUTH_USER_KEY)
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
    }

    /// Attach `user_id` as the logged-in identity.
    pub fn login(&mut self, user_id: UserId) {
        self.data
            .insert(AUTH_USER_KEY.to_string(), Value::String(user_id.to_string()));
    }
}
