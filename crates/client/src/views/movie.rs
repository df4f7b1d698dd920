//! Movie detail page: record, ratings and comments.

use mymovielist_core::{Comment, CommentId, MovieDetail, MovieId, Rating, ValidationError};
use tracing::{instrument, warn};

use super::{Confirm, Outcome};
use crate::api::{ApiError, CatalogApi};
use crate::routes::login_required;
use crate::session::SessionStore;

/// Confirmation prompt for comment deletion.
pub const DELETE_COMMENT_PROMPT: &str = "Are you sure you want to delete this comment?";

/// Load state of the detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Loading,
    Loaded(MovieDetail),
    /// The backend has no such movie.
    NotFound,
    /// The backend could not be reached or failed.
    Unavailable,
}

/// Movie detail view-model.
pub struct MovieView<C> {
    api: C,
    session: SessionStore,
    movie_id: MovieId,
    state: DetailState,
    comment_draft: String,
    submitting: bool,
}

impl<C: CatalogApi> MovieView<C> {
    #[must_use]
    pub const fn new(api: C, session: SessionStore, movie_id: MovieId) -> Self {
        Self {
            api,
            session,
            movie_id,
            state: DetailState::Loading,
            comment_draft: String::new(),
            submitting: false,
        }
    }

    #[must_use]
    pub const fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&MovieDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// Whether a rate or comment call is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    pub fn set_comment_draft(&mut self, text: &str) {
        text.clone_into(&mut self.comment_draft);
    }

    /// Whether the current user may delete `comment`.
    #[must_use]
    pub fn can_delete(&self, comment: &Comment) -> bool {
        self.session
            .identity()
            .is_some_and(|identity| comment.deletable_by(&identity))
    }

    /// Fetch the movie. A refetch after a failure keeps the last good data.
    #[instrument(skip(self), fields(movie_id = %self.movie_id))]
    pub async fn load(&mut self) {
        match self.api.movie(self.movie_id).await {
            Ok(detail) => self.state = DetailState::Loaded(detail),
            Err(e) if e.is_not_found() => self.state = DetailState::NotFound,
            Err(e) => {
                warn!(error = %e, "Failed to load movie");
                if self.detail().is_none() {
                    self.state = DetailState::Unavailable;
                }
            }
        }
    }

    /// Rate the movie, then reload so the new rating shows.
    #[instrument(skip(self), fields(movie_id = %self.movie_id))]
    pub async fn rate(&mut self, rating: Rating) -> Outcome {
        if !self.session.is_logged_in() {
            return Outcome::Redirect(login_required(self.movie_id));
        }

        self.submitting = true;
        let result = self.api.rate(self.movie_id, rating).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.load().await;
                Outcome::Done
            }
            Err(e) => failed(&e, "Failed to submit rating"),
        }
    }

    /// Post the comment draft, then clear it and reload.
    #[instrument(skip(self), fields(movie_id = %self.movie_id))]
    pub async fn submit_comment(&mut self) -> Outcome {
        if !self.session.is_logged_in() {
            return Outcome::Redirect(login_required(self.movie_id));
        }
        let text = self.comment_draft.trim().to_owned();
        if text.is_empty() {
            return Outcome::Invalid(ValidationError::MissingField("comment"));
        }

        self.submitting = true;
        let result = self.api.comment(self.movie_id, &text).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.comment_draft.clear();
                self.load().await;
                Outcome::Done
            }
            Err(e) => failed(&e, "Failed to post comment"),
        }
    }

    /// Set the draft to `text` and post it.
    pub async fn comment(&mut self, text: &str) -> Outcome {
        self.set_comment_draft(text);
        self.submit_comment().await
    }

    /// Delete a comment after confirmation; author or admin only.
    #[instrument(skip(self, confirm), fields(movie_id = %self.movie_id))]
    pub async fn delete_comment(
        &mut self,
        comment_id: CommentId,
        confirm: &mut impl Confirm,
    ) -> Outcome {
        if !self.session.is_logged_in() {
            return Outcome::Redirect(login_required(self.movie_id));
        }
        let Some(comment) = self
            .detail()
            .and_then(|d| d.comments.iter().find(|c| c.comment_id == comment_id))
        else {
            return Outcome::Invalid(ValidationError::Invalid(format!(
                "No comment {comment_id} on this page"
            )));
        };
        if !self.can_delete(comment) {
            return Outcome::Invalid(ValidationError::Invalid(
                "You can only delete your own comments".to_string(),
            ));
        }
        if !confirm.confirm(DELETE_COMMENT_PROMPT) {
            return Outcome::Declined;
        }

        match self.api.delete_comment(self.movie_id, comment_id).await {
            Ok(()) => {
                self.load().await;
                Outcome::Done
            }
            Err(e) => failed(&e, "Failed to delete comment"),
        }
    }
}

fn failed(error: &ApiError, fallback: &str) -> Outcome {
    warn!(error = %error, "{fallback}");
    Outcome::Failed(error.reason().unwrap_or(fallback).to_string())
}
