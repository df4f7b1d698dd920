//! Core types for MyMovieList.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod comment;
pub mod form;
pub mod id;
pub mod identity;
pub mod lenient;
pub mod movie;
pub mod rating;
pub mod release_date;
pub mod role;
pub mod text;

pub use comment::Comment;
pub use form::{MovieDraft, MovieField, MovieForm, ValidationError};
pub use id::*;
pub use identity::Identity;
pub use movie::{HomeFeed, Movie, MovieDetail, MovieSummary};
pub use rating::{Rating, RatingError};
pub use release_date::{normalize_release_date, parse_release_date};
pub use role::Role;
pub use text::{DEFAULT_OVERVIEW, truncate_with_ellipsis};
