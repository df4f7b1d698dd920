//! Shell error type.

use thiserror::Error;

/// Failures that end the shell. Backend failures never do; the views absorb
/// them.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}
