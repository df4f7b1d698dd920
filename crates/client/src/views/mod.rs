//! Page view-models.
//!
//! Each view owns its page state and a request-client handle. Operations
//! take `&mut self`, await the backend and fold the outcome into state;
//! none of them return errors to the front end.

pub mod admin;
pub mod fence;
pub mod home;
pub mod movie;
pub mod search;

use mymovielist_core::ValidationError;

use crate::routes::Route;

pub use admin::AdminMoviesView;
pub use fence::{FenceToken, RequestFence};
pub use home::HomeView;
pub use movie::MovieView;
pub use search::SearchView;

/// Result of a user action on a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action went through.
    Done,
    /// Nothing to do: the action is disabled in the current state.
    Skipped,
    /// The user declined the confirmation prompt.
    Declined,
    /// The front end should navigate here instead.
    Redirect(Route),
    /// Blocked before sending: the input is incomplete or invalid.
    Invalid(ValidationError),
    /// The backend call failed; carries the message shown to the user.
    Failed(String),
}

/// A message recorded on a view for the front end to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    /// Must be acknowledged before the user continues.
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A fixed answer, for scripted use.
impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}
