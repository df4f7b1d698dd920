//! In-memory backend for view-model tests.
//!
//! Mirrors the backend's observable behaviour closely enough for the views:
//! session cookie, paging, filtering, access checks, error bodies.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use mymovielist_core::{
    Comment, CommentId, HomeFeed, Identity, Movie, MovieDetail, MovieDraft, MovieId, MovieSummary,
    Rating, Role, UserId, parse_release_date,
};
use secrecy::{ExposeSecret, SecretString};

use crate::api::{AdminApi, ApiError, AuthApi, CatalogApi, MoviePage};

/// Shared fake backend; clones see the same state.
#[derive(Clone)]
pub struct FakeBackend {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    page_size: usize,
    accounts: Vec<Account>,
    session: Option<Identity>,
    movies: Vec<Movie>,
    next_movie_id: i32,
    ratings: HashMap<(MovieId, UserId), u8>,
    comments: Vec<(MovieId, Comment)>,
    next_comment_id: i32,
    home: HomeFeed,
    failures: HashMap<String, (u16, Option<String>)>,
    list_responses: VecDeque<MoviePage>,
    calls: Vec<String>,
}

struct Account {
    identity: Identity,
    email: String,
    password: String,
}

type Reply<T> = Result<T, ApiError>;

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                page_size: 3,
                next_movie_id: 1,
                next_comment_id: 1,
                ..FakeState::default()
            })),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().expect("fake backend lock")
    }

    pub fn with_user(self, username: &str, email: &str, password: &str, role: Role) -> Self {
        {
            let mut state = self.state();
            let id = UserId::new(i32::try_from(state.accounts.len()).expect("few users") + 1);
            state.accounts.push(Account {
                identity: Identity {
                    id,
                    username: username.to_string(),
                    role,
                },
                email: email.to_string(),
                password: password.to_string(),
            });
        }
        self
    }

    /// Seed `count` movies titled `Movie 1` .. `Movie N`.
    pub fn with_movies(self, count: usize) -> Self {
        for n in 1..=count {
            self.insert_movie(&format!("Movie {n}"));
        }
        self
    }

    pub fn with_home(self, home: HomeFeed) -> Self {
        self.state().home = home;
        self
    }

    pub fn insert_movie(&self, title: &str) -> MovieId {
        let mut state = self.state();
        let id = MovieId::new(state.next_movie_id);
        state.next_movie_id += 1;
        state.movies.push(movie(id, title));
        id
    }

    pub fn add_comment(&self, movie_id: MovieId, author: &str, text: &str) -> CommentId {
        let mut state = self.state();
        let id = CommentId::new(state.next_comment_id);
        state.next_comment_id += 1;
        state.comments.push((
            movie_id,
            Comment {
                comment_id: id,
                comment_text: text.to_string(),
                time_stamp: "Mon, 06 Oct 2025 18:21:00 GMT".to_string(),
                user_name: author.to_string(),
            },
        ));
        id
    }

    /// Bind the session cookie to `username` out of band.
    pub fn log_in_as(&self, username: &str) {
        let mut state = self.state();
        let identity = state
            .accounts
            .iter()
            .find(|a| a.identity.username == username)
            .map(|a| a.identity.clone())
            .expect("known user");
        state.session = Some(identity);
    }

    /// Make every call to `endpoint` (e.g. `"POST /admin/movie"`) fail.
    pub fn fail(&self, endpoint: &str, status: u16, reason: Option<&str>) {
        self.state()
            .failures
            .insert(endpoint.to_string(), (status, reason.map(str::to_string)));
    }

    pub fn recover(&self, endpoint: &str) {
        self.state().failures.remove(endpoint);
    }

    /// Answer the next `list_movies` call with `page` instead of real data.
    pub fn queue_list_response(&self, page: MoviePage) {
        self.state().list_responses.push_back(page);
    }

    pub fn remove_movie(&self, id: MovieId) {
        self.state().movies.retain(|m| m.movie_id != id);
    }

    pub fn movie(&self, id: MovieId) -> Option<Movie> {
        self.state().movies.iter().find(|m| m.movie_id == id).cloned()
    }

    pub fn movie_count(&self) -> usize {
        self.state().movies.len()
    }

    pub fn comment_count(&self, movie_id: MovieId) -> usize {
        self.state()
            .comments
            .iter()
            .filter(|(m, _)| *m == movie_id)
            .count()
    }

    /// Every request received, as `METHOD /path[?query]`.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of requests whose line starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Record the call and apply any injected failure for its endpoint.
    fn enter(
        &self,
        method: &str,
        path: &str,
        query: &str,
    ) -> Reply<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        let line = if query.is_empty() {
            format!("{method} {path}")
        } else {
            format!("{method} {path}?{query}")
        };
        state.calls.push(line);

        let endpoint = format!("{method} {}", endpoint_pattern(path));
        if let Some((status, reason)) = state.failures.get(&endpoint).cloned() {
            return Err(status_error(status, reason.as_deref()));
        }
        Ok(state)
    }
}

/// `/movie/7/rate` -> `/movie/:id/rate`
fn endpoint_pattern(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()) {
                ":id"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn status_error(status: u16, reason: Option<&str>) -> ApiError {
    let reason = reason.map(str::to_string);
    if status == 404 {
        ApiError::NotFound { reason }
    } else {
        ApiError::Rejected { status, reason }
    }
}

pub fn movie(id: MovieId, title: &str) -> Movie {
    Movie {
        movie_id: id,
        title: title.to_string(),
        overview: None,
        tagline: None,
        release_date: None,
        runtime: None,
        budget: None,
        language: None,
        cover_url: None,
        vote_average: None,
        vote_count: None,
    }
}

pub fn summary(id: i32, title: &str) -> MovieSummary {
    MovieSummary {
        movie_id: MovieId::new(id),
        title: title.to_string(),
        overview: None,
        cover_url: None,
        vote_average: None,
        vote_count: None,
        release_date: None,
        release_year: None,
        comment_count: None,
        total_comments: None,
    }
}

fn apply_draft(movie: &mut Movie, draft: &MovieDraft) {
    fn text(s: &str) -> Option<String> {
        (!s.is_empty()).then(|| s.to_string())
    }
    draft.title.clone_into(&mut movie.title);
    movie.tagline = text(&draft.tagline);
    movie.overview = text(&draft.overview);
    movie.release_date = draft.release_date.as_deref().and_then(parse_release_date);
    movie.runtime = draft.runtime;
    movie.budget = draft.budget;
    movie.language = text(&draft.language);
    movie.cover_url = text(&draft.cover_url);
    movie.vote_average = draft.vote_average;
    movie.vote_count = draft.vote_count;
}

fn require_admin(state: &FakeState) -> Reply<()> {
    if state.session.as_ref().is_some_and(Identity::is_admin) {
        Ok(())
    } else {
        Err(status_error(403, Some("Access denied")))
    }
}

fn require_login(state: &FakeState) -> Reply<Identity> {
    state
        .session
        .clone()
        .ok_or_else(|| status_error(401, Some("Login required")))
}

impl AuthApi for FakeBackend {
    async fn me(&self) -> Reply<Option<Identity>> {
        let state = self.enter("GET", "/me", "")?;
        Ok(state.session.clone())
    }

    async fn login(&self, username_or_email: &str, password: &SecretString) -> Reply<Identity> {
        let mut state = self.enter("POST", "/login", "")?;
        let identity = state
            .accounts
            .iter()
            .find(|a| {
                (a.identity.username == username_or_email || a.email == username_or_email)
                    && a.password == password.expose_secret()
            })
            .map(|a| a.identity.clone())
            .ok_or_else(|| status_error(401, Some("Invalid credentials")))?;
        state.session = Some(identity.clone());
        Ok(identity)
    }

    async fn logout(&self) -> Reply<()> {
        let mut state = self.enter("POST", "/logout", "")?;
        state.session = None;
        Ok(())
    }

    async fn signup(&self, username: &str, email: &str, password: &SecretString) -> Reply<()> {
        let taken = {
            let state = self.enter("POST", "/signup", "")?;
            state.accounts.iter().any(|a| a.identity.username == username)
        };
        if taken {
            return Err(status_error(400, Some("Username already exists")));
        }
        let _ = self
            .clone()
            .with_user(username, email, password.expose_secret(), Role::User);
        Ok(())
    }
}

impl CatalogApi for FakeBackend {
    async fn home(&self) -> Reply<HomeFeed> {
        let state = self.enter("GET", "/home", "")?;
        Ok(state.home.clone())
    }

    async fn search(&self, query: &str) -> Reply<Vec<MovieSummary>> {
        let state = self.enter("GET", "/search", &format!("query={query}"))?;
        let needle = query.to_lowercase();
        Ok(state
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .map(|m| summary(m.movie_id.as_i32(), &m.title))
            .collect())
    }

    async fn movie(&self, id: MovieId) -> Reply<MovieDetail> {
        let state = self.enter("GET", &format!("/movie/{id}"), "")?;
        let movie = state
            .movies
            .iter()
            .find(|m| m.movie_id == id)
            .cloned()
            .ok_or_else(|| status_error(404, Some("Movie not found")))?;

        let scores: Vec<u8> = state
            .ratings
            .iter()
            .filter(|((m, _), _)| *m == id)
            .map(|(_, r)| *r)
            .collect();
        let user_rating_average = if scores.is_empty() {
            0.0
        } else {
            let count = u32::try_from(scores.len()).expect("few ratings");
            scores.iter().map(|r| f64::from(*r)).sum::<f64>() / f64::from(count)
        };
        let user_rating = state
            .session
            .as_ref()
            .and_then(|s| state.ratings.get(&(id, s.id)))
            .and_then(|r| Rating::new(i64::from(*r)).ok());
        let comments = state
            .comments
            .iter()
            .filter(|(m, _)| *m == id)
            .map(|(_, c)| c.clone())
            .collect();

        Ok(MovieDetail {
            movie,
            user_rating_average,
            user_rating,
            comments,
        })
    }

    async fn rate(&self, id: MovieId, rating: Rating) -> Reply<()> {
        let mut state = self.enter("POST", &format!("/movie/{id}/rate"), "")?;
        let user = require_login(&state)?;
        state.ratings.insert((id, user.id), rating.stars());
        Ok(())
    }

    async fn comment(&self, id: MovieId, text: &str) -> Reply<()> {
        let user = {
            let state = self.enter("POST", &format!("/movie/{id}/comment"), "")?;
            require_login(&state)?
        };
        if text.trim().is_empty() {
            return Err(status_error(400, Some("Comment cannot be empty")));
        }
        self.add_comment(id, &user.username, text);
        Ok(())
    }

    async fn delete_comment(&self, _movie_id: MovieId, comment_id: CommentId) -> Reply<()> {
        let mut state = self.enter("POST", &format!("/delete_comment/{comment_id}"), "")?;
        let user = require_login(&state)?;
        let comment = state
            .comments
            .iter()
            .find(|(_, c)| c.comment_id == comment_id)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| status_error(404, Some("Comment not found")))?;
        if !comment.deletable_by(&user) {
            return Err(status_error(403, Some("Permission denied")));
        }
        state.comments.retain(|(_, c)| c.comment_id != comment_id);
        Ok(())
    }
}

impl AdminApi for FakeBackend {
    async fn list_movies(&self, page: u32, query: &str) -> Reply<MoviePage> {
        let mut state = self.enter("GET", "/admin/movies", &format!("page={page}&query={query}"))?;
        require_admin(&state)?;
        if let Some(queued) = state.list_responses.pop_front() {
            return Ok(queued);
        }

        let needle = query.to_lowercase();
        let matching: Vec<Movie> = state
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let size = state.page_size;
        let total = matching.len();
        let total_pages = total.div_ceil(size);
        let start = (usize::try_from(page.max(1)).expect("page fits") - 1) * size;
        let movies = matching.into_iter().skip(start).take(size).collect();

        Ok(MoviePage {
            movies,
            total_pages: Some(u32::try_from(total_pages).expect("few pages")),
            current_page: Some(page),
            total_movies: Some(u32::try_from(total).expect("few movies")),
        })
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Reply<()> {
        {
            let state = self.enter("POST", "/admin/movie", "")?;
            require_admin(&state)?;
        }
        if draft.title.is_empty() {
            return Err(status_error(400, Some("Title is required")));
        }
        let id = self.insert_movie(&draft.title);
        let mut state = self.state();
        if let Some(movie) = state.movies.iter_mut().find(|m| m.movie_id == id) {
            apply_draft(movie, draft);
        }
        Ok(())
    }

    async fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> Reply<()> {
        let mut state = self.enter("PUT", &format!("/admin/movie/{id}"), "")?;
        require_admin(&state)?;
        let movie = state
            .movies
            .iter_mut()
            .find(|m| m.movie_id == id)
            .ok_or_else(|| status_error(404, None))?;
        apply_draft(movie, draft);
        Ok(())
    }

    async fn delete_movie(&self, id: MovieId) -> Reply<()> {
        let mut state = self.enter("DELETE", &format!("/admin/movie/{id}"), "")?;
        require_admin(&state)?;
        state.movies.retain(|m| m.movie_id != id);
        Ok(())
    }
}
