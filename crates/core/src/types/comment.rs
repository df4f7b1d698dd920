//! Movie comments.

use serde::{Deserialize, Serialize};

use crate::{CommentId, Identity};

/// A user comment attached to exactly one movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: CommentId,
    pub comment_text: String,
    /// Timestamp as formatted by the backend.
    #[serde(default)]
    pub time_stamp: String,
    /// Author's username.
    pub user_name: String,
}

impl Comment {
    /// Whether `identity` may delete this comment: its author or any admin.
    #[must_use]
    pub fn deletable_by(&self, identity: &Identity) -> bool {
        identity.is_admin() || identity.username == self.user_name
    }

    /// First letter of the author's name, upper-cased, for avatars.
    #[must_use]
    pub fn author_initial(&self) -> String {
        self.user_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
