//! Authenticated identity.

use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// The identity of the logged-in user, as reported by `/me` and `/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user ID.
    pub id: UserId,
    /// Display name; also the author name attached to comments.
    pub username: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    /// Whether this identity may use the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
