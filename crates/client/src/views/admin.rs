//! Admin console: the paginated, filterable movie collection.
//!
//! Every fetch is fenced: [`AdminMoviesView::begin_fetch`] issues a token,
//! and [`AdminMoviesView::apply`] drops any response whose token has been
//! superseded. [`AdminMoviesView::refresh`] does both in sequence; front
//! ends that overlap fetches can drive the two halves themselves.

use mymovielist_core::{Movie, MovieField, MovieForm, MovieId, ValidationError};
use tracing::{debug, instrument, warn};

use super::fence::{FenceToken, RequestFence};
use super::{Confirm, Notice, Outcome};
use crate::api::{AdminApi, ApiError, AuthApi, MoviePage};
use crate::routes::Route;
use crate::services::auth::AuthGateway;

pub const DELETE_MOVIE_PROMPT: &str = "Are you sure you want to delete this movie?";
pub const MOVIE_ADDED: &str = "Movie added successfully!";
pub const ADD_FAILED: &str = "Failed to add movie";
pub const UPDATE_FAILED: &str = "Failed to update movie";
pub const DELETE_FAILED: &str = "Failed to delete movie";

/// The record being edited and its unsaved buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub id: MovieId,
    pub form: MovieForm,
}

/// A fetch that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PageRequest {
    token: FenceToken,
    page: u32,
    query: String,
}

impl PageRequest {
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Perform the request.
    pub async fn send<A: AdminApi>(self, api: &A) -> PageResponse {
        let result = api.list_movies(self.page, &self.query).await;
        PageResponse {
            token: self.token,
            result,
        }
    }
}

/// The answer to a [`PageRequest`].
#[derive(Debug)]
pub struct PageResponse {
    token: FenceToken,
    result: Result<MoviePage, ApiError>,
}

/// What [`AdminMoviesView::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The page was shown.
    Current,
    /// A newer fetch was issued since; the response was dropped.
    Stale,
    /// The collection shrank below the current page; the page was clamped
    /// and must be fetched again.
    Clamped,
    /// The fetch failed.
    Failed,
}

/// Admin collection view-model.
pub struct AdminMoviesView<A> {
    api: A,
    page: u32,
    total_pages: u32,
    total_movies: Option<u32>,
    filter_query: String,
    page_input: String,
    items: Vec<Movie>,
    editing: Option<EditState>,
    creation: MovieForm,
    loading: bool,
    load_failed: bool,
    notice: Option<Notice>,
    fence: RequestFence,
}

impl<A: AdminApi> AdminMoviesView<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            page: 1,
            total_pages: 1,
            total_movies: None,
            filter_query: String::new(),
            page_input: "1".to_string(),
            items: Vec::new(),
            editing: None,
            creation: MovieForm::default(),
            loading: false,
            load_failed: false,
            notice: None,
            fence: RequestFence::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn total_movies(&self) -> Option<u32> {
        self.total_movies
    }

    #[must_use]
    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    #[must_use]
    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    #[must_use]
    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    #[must_use]
    pub const fn creation(&self) -> &MovieForm {
        &self.creation
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last fetch failed.
    #[must_use]
    pub const fn load_failed(&self) -> bool {
        self.load_failed
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Acknowledge and remove the current notice.
    pub const fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Re-check the session and load the first page. Non-admins are sent
    /// home without a fetch.
    pub async fn mount<Au: AuthApi>(&mut self, auth: &AuthGateway<Au>) -> Outcome {
        if !auth.check_session().await.is_admin() {
            debug!("Admin view mounted without admin session");
            return Outcome::Redirect(Route::default());
        }
        self.refresh().await;
        Outcome::Done
    }

    /// Issue a fetch of the current page, superseding any in flight.
    pub fn begin_fetch(&mut self) -> PageRequest {
        self.loading = true;
        PageRequest {
            token: self.fence.issue(),
            page: self.page,
            query: self.filter_query.clone(),
        }
    }

    /// Apply a fetch result if it is still the latest.
    pub fn apply(&mut self, response: PageResponse) -> Applied {
        if !self.fence.is_current(response.token) {
            debug!("Dropping superseded page response");
            return Applied::Stale;
        }
        self.loading = false;

        match response.result {
            Ok(page) => {
                self.load_failed = false;
                self.total_pages = page.page_count();
                self.total_movies = page.total_movies;
                self.items = page.movies;
                if self.page > self.total_pages {
                    self.set_page(self.total_pages);
                    return Applied::Clamped;
                }
                Applied::Current
            }
            Err(e) => {
                warn!(error = %e, page = self.page, "Failed to load admin movies");
                self.load_failed = true;
                self.items.clear();
                Applied::Failed
            }
        }
    }

    /// Fetch the current page; if it no longer exists, fetch the last one.
    #[instrument(skip(self), fields(page = self.page, query = %self.filter_query))]
    pub async fn refresh(&mut self) {
        let response = self.begin_fetch().send(&self.api).await;
        if self.apply(response) == Applied::Clamped {
            let response = self.begin_fetch().send(&self.api).await;
            self.apply(response);
        }
    }

    // =========================================================================
    // Paging and filtering
    // =========================================================================

    fn set_page(&mut self, page: u32) {
        self.page = page;
        self.page_input = page.to_string();
    }

    pub async fn next_page(&mut self) -> Outcome {
        if !self.can_next() {
            return Outcome::Skipped;
        }
        self.set_page(self.page + 1);
        self.refresh().await;
        Outcome::Done
    }

    pub async fn prev_page(&mut self) -> Outcome {
        if !self.can_prev() {
            return Outcome::Skipped;
        }
        self.set_page(self.page - 1);
        self.refresh().await;
        Outcome::Done
    }

    /// Update the page-number entry without navigating.
    pub fn set_page_input(&mut self, input: &str) {
        input.clone_into(&mut self.page_input);
    }

    /// Jump to the page in the entry. Out-of-range or non-numeric input
    /// reverts the entry to the current page and fetches nothing.
    pub async fn submit_page_input(&mut self) -> Outcome {
        match self.page_input.trim().parse::<u32>() {
            Ok(page) if (1..=self.total_pages).contains(&page) => {
                self.set_page(page);
                self.refresh().await;
                Outcome::Done
            }
            _ => {
                let rejected = std::mem::replace(&mut self.page_input, self.page.to_string());
                Outcome::Invalid(ValidationError::Invalid(format!(
                    "Page must be between 1 and {}, got {rejected:?}",
                    self.total_pages
                )))
            }
        }
    }

    /// Filter by title; always restarts at page 1.
    /// Change the filter and return to page 1 without fetching.
    pub fn set_filter_query(&mut self, query: &str) {
        query.trim().clone_into(&mut self.filter_query);
        self.set_page(1);
    }

    pub async fn set_filter(&mut self, query: &str) {
        self.set_filter_query(query);
        self.refresh().await;
    }

    pub async fn clear_filter(&mut self) {
        self.set_filter("").await;
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Enter edit mode on a record of the current page, discarding any
    /// other unsaved edit.
    pub fn start_edit(&mut self, id: MovieId) -> Outcome {
        let Some(movie) = self.items.iter().find(|m| m.movie_id == id) else {
            return Outcome::Invalid(ValidationError::Invalid(format!(
                "Movie {id} is not on this page"
            )));
        };
        self.editing = Some(EditState {
            id,
            form: MovieForm::from_movie(movie),
        });
        Outcome::Done
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        if self.editing.take().is_some() {
            Outcome::Done
        } else {
            Outcome::Skipped
        }
    }

    /// Change one field of the edit buffer.
    pub fn edit_field(&mut self, field: MovieField, value: &str) -> Outcome {
        let Some(edit) = self.editing.as_mut() else {
            return Outcome::Skipped;
        };
        edit.form
            .set(field, value)
            .map_or_else(Outcome::Invalid, |()| Outcome::Done)
    }

    /// Send the edit buffer. Success leaves edit mode and re-fetches;
    /// failure stays in edit mode.
    #[instrument(skip(self))]
    pub async fn save_edit(&mut self) -> Outcome {
        let Some(edit) = &self.editing else {
            return Outcome::Skipped;
        };
        let id = edit.id;
        let draft = match edit.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => return Outcome::Invalid(e),
        };

        match self.api.update_movie(id, &draft).await {
            Ok(()) => {
                self.editing = None;
                self.refresh().await;
                Outcome::Done
            }
            Err(e) => self.fail(&e, UPDATE_FAILED),
        }
    }

    // =========================================================================
    // Creating and deleting
    // =========================================================================

    /// Change one field of the creation buffer.
    pub fn new_field(&mut self, field: MovieField, value: &str) -> Outcome {
        self.creation
            .set(field, value)
            .map_or_else(Outcome::Invalid, |()| Outcome::Done)
    }

    /// Send the creation buffer. Success clears it and re-fetches; failure
    /// keeps it.
    #[instrument(skip(self))]
    pub async fn create(&mut self) -> Outcome {
        let draft = match self.creation.to_draft() {
            Ok(draft) => draft,
            Err(e) => return Outcome::Invalid(e),
        };

        match self.api.create_movie(&draft).await {
            Ok(()) => {
                self.creation = MovieForm::default();
                self.refresh().await;
                self.notice = Some(Notice::Success(MOVIE_ADDED.to_string()));
                Outcome::Done
            }
            Err(e) => self.fail(&e, ADD_FAILED),
        }
    }

    /// Delete a record after confirmation. The list only changes through
    /// the re-fetch that follows a successful delete.
    #[instrument(skip(self, confirm))]
    pub async fn delete(&mut self, id: MovieId, confirm: &mut impl Confirm) -> Outcome {
        if !confirm.confirm(DELETE_MOVIE_PROMPT) {
            return Outcome::Declined;
        }

        match self.api.delete_movie(id).await {
            Ok(()) => {
                if self.editing.as_ref().is_some_and(|e| e.id == id) {
                    self.editing = None;
                }
                self.refresh().await;
                Outcome::Done
            }
            Err(e) => self.fail(&e, DELETE_FAILED),
        }
    }

    fn fail(&mut self, error: &ApiError, message: &str) -> Outcome {
        warn!(error = %error, "{message}");
        self.notice = Some(Notice::Error(message.to_string()));
        Outcome::Failed(message.to_string())
    }
}
