//! Start-up errors.
//!
//! Page operations never fail outward: they fold their failures into view
//! state. Only building the client can fail, and it does so with
//! `ClientError`.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that prevent the client from starting.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
