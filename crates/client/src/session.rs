//! The session store: who, if anyone, is logged in.
//!
//! A [`SessionStore`] is an owned handle cloned into every consumer. Only
//! the auth gateway writes to it; everything else reads.

use std::sync::{Arc, PoisonError, RwLock};

use mymovielist_core::Identity;
use tracing::debug;

/// What the client knows about the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No identity check has completed yet.
    #[default]
    Unknown,
    /// The backend reported no logged-in user.
    Anonymous,
    /// A user is logged in.
    Authenticated(Identity),
}

impl AuthState {
    /// The logged-in identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unknown | Self::Anonymous => None,
        }
    }

    /// Whether an identity check has completed.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(Identity::is_admin)
    }
}

impl From<Option<Identity>> for AuthState {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// Shared handle to the current [`AuthState`].
///
/// Starts [`AuthState::Unknown`]. Every write replaces the whole value.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<AuthState>>,
}

impl SessionStore {
    /// Create a store in the `Unknown` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The logged-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    /// Replace the held identity; `None` means anonymous.
    pub fn set_identity(&self, identity: Option<Identity>) {
        let next = AuthState::from(identity);
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if *guard != next {
            debug!(from = ?*guard, to = ?next, "Session state changed");
        }
        *guard = next;
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state().is_admin()
    }
}
