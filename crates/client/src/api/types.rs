//! Wire shapes of request and response bodies.

use mymovielist_core::{Identity, Movie, MovieId, lenient};
use serde::{Deserialize, Serialize};

/// Response of `GET /me`.
#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<Identity>,
}

/// Body of `POST /login`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username_or_email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /signup`.
#[derive(Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /movie/:id/rate`.
#[derive(Serialize)]
pub(crate) struct RateRequest {
    pub rating: u8,
}

/// Body of `POST /movie/:id/comment`.
#[derive(Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub comment: &'a str,
}

/// Body of `POST /delete_comment/:id`.
#[derive(Serialize)]
pub(crate) struct DeleteCommentRequest {
    pub movie_id: MovieId,
}

/// `{success}` / `{error}` acknowledgement returned by mutations.
#[derive(Debug, Deserialize)]
pub(crate) struct Acknowledgement {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// A reply without a readable body is an acknowledgement.
impl Default for Acknowledgement {
    fn default() -> Self {
        Self {
            success: true,
            error: None,
        }
    }
}

/// Error body shape shared by every endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_reason(self) -> Option<String> {
        self.error.or(self.message).filter(|r| !r.trim().is_empty())
    }
}

/// One page of the admin collection, as returned by `GET /admin/movies`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub movies: Vec<Movie>,
    /// Page count reported by the backend; `0` for an empty collection.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub total_pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub current_page: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub total_movies: Option<u32>,
}

impl MoviePage {
    /// Page count clamped to at least one.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.total_pages.unwrap_or(1).max(1)
    }
}
