//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A required credential field is blank; nothing was sent.
    #[error("Missing credentials")]
    MissingCredentials,

    /// The backend refused the request, or it never completed.
    #[error("{reason}")]
    Rejected {
        /// Backend-supplied reason, or a generic fallback.
        reason: String,
    },
}

impl AuthError {
    /// Message to show next to the form.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
