//! MyMovieList client library.
//!
//! Everything a front end needs to drive the MyMovieList backend: the HTTP
//! request client, the session store and auth gateway, the view router and
//! one view-model per page. Front ends own rendering only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use error::ClientError;
pub use session::{AuthState, SessionStore};
pub use state::AppState;
