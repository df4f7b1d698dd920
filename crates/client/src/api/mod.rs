//! Request client for the MyMovieList REST backend.
//!
//! # Architecture
//!
//! - One trait per backend area: [`AuthApi`], [`CatalogApi`], [`AdminApi`]
//! - [`HttpApi`] implements all three over `reqwest` with a cookie store,
//!   so the backend's session cookie carries the login
//! - The home feed is cached in memory via `moka`
//!
//! Views and the auth gateway are generic over these traits; tests swap in
//! an in-memory backend.

mod http;
pub mod types;

use std::future::Future;

pub use http::HttpApi;
pub use types::MoviePage;

use mymovielist_core::{
    CommentId, HomeFeed, Identity, MovieDetail, MovieDraft, MovieId, MovieSummary, Rating,
};
use secrecy::SecretString;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect, DNS, I/O).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Request rejected ({status}){}", reason_suffix(.reason.as_deref()))]
    Rejected {
        status: u16,
        /// The `error` field of the response body, if any.
        reason: Option<String>,
    },

    /// The backend answered 404.
    #[error("Not found{}", reason_suffix(.reason.as_deref()))]
    NotFound { reason: Option<String> },

    /// A success response whose body could not be read.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

fn reason_suffix(reason: Option<&str>) -> String {
    reason.map(|r| format!(": {r}")).unwrap_or_default()
}

impl ApiError {
    /// The backend-supplied reason, if the backend gave one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } | Self::NotFound { reason } => reason.as_deref(),
            _ => None,
        }
    }

    /// Whether the backend reported 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Session endpoints.
pub trait AuthApi: Send + Sync {
    /// `GET /me`: the identity bound to the current session, if any.
    fn me(&self) -> impl Future<Output = Result<Option<Identity>, ApiError>> + Send;

    /// `POST /login`.
    fn login(
        &self,
        username_or_email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<Identity, ApiError>> + Send;

    /// `POST /logout`.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /signup`.
    fn signup(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Public catalog endpoints plus the per-user rating and comment calls.
pub trait CatalogApi: Send + Sync {
    /// `GET /home`.
    fn home(&self) -> impl Future<Output = Result<HomeFeed, ApiError>> + Send;

    /// `GET /search?query=`.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<MovieSummary>, ApiError>> + Send;

    /// `GET /movie/:id`.
    fn movie(&self, id: MovieId) -> impl Future<Output = Result<MovieDetail, ApiError>> + Send;

    /// `POST /movie/:id/rate`.
    fn rate(&self, id: MovieId, rating: Rating) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /movie/:id/comment`.
    fn comment(&self, id: MovieId, text: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /delete_comment/:comment_id`.
    fn delete_comment(
        &self,
        movie_id: MovieId,
        comment_id: CommentId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Admin collection endpoints.
pub trait AdminApi: Send + Sync {
    /// `GET /admin/movies?page=&query=`.
    fn list_movies(
        &self,
        page: u32,
        query: &str,
    ) -> impl Future<Output = Result<MoviePage, ApiError>> + Send;

    /// `POST /admin/movie`.
    fn create_movie(&self, draft: &MovieDraft) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `PUT /admin/movie/:id`.
    fn update_movie(
        &self,
        id: MovieId,
        draft: &MovieDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `DELETE /admin/movie/:id`.
    fn delete_movie(&self, id: MovieId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApiError::Rejected {
            status: 401,
            reason: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.to_string(), "Request rejected (401): Invalid credentials");
        assert_eq!(err.reason(), Some("Invalid credentials"));

        let err = ApiError::NotFound { reason: None };
        assert_eq!(err.to_string(), "Not found");
        assert!(err.is_not_found());
    }
}
