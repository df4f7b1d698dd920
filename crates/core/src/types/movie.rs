//! Movie records and the aggregates built from them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{lenient, release_date};
use crate::{Comment, DEFAULT_OVERVIEW, MovieId, Rating, truncate_with_ellipsis};

/// A full movie record as held by the backend collection.
///
/// `movie_id` is assigned by the backend and never changes; every other
/// field may be rewritten by an admin update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default, with = "release_date::option")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub budget: Option<i64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Critic vote average.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub vote_count: Option<u32>,
}

impl Movie {
    /// Overview text, or the standard placeholder.
    #[must_use]
    pub fn overview_or_default(&self) -> &str {
        non_blank(self.overview.as_deref()).unwrap_or(DEFAULT_OVERVIEW)
    }
}

/// The reduced movie shape returned by the home feed and search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub vote_count: Option<u32>,
    #[serde(default, with = "release_date::option")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub release_year: Option<i64>,
    /// Comments posted during the last week (trending tab).
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub comment_count: Option<u32>,
    /// Comments posted overall (popular tab).
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub total_comments: Option<u32>,
}

impl MovieSummary {
    /// Overview truncated to `limit` characters, or the standard placeholder.
    #[must_use]
    pub fn overview_excerpt(&self, limit: usize) -> String {
        non_blank(self.overview.as_deref())
            .map_or_else(|| DEFAULT_OVERVIEW.to_owned(), |o| truncate_with_ellipsis(o, limit))
    }

    /// Release year, from the explicit field or the release date.
    #[must_use]
    pub fn year(&self) -> Option<i64> {
        self.release_year
            .or_else(|| self.release_date.map(|d| i64::from(d.year())))
    }

    /// Two-letter placeholder used when no cover image exists.
    #[must_use]
    pub fn poster_placeholder(&self) -> String {
        self.title.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// The four home page lists, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    #[serde(default)]
    pub top_rated: Vec<MovieSummary>,
    #[serde(default)]
    pub random: Vec<MovieSummary>,
    #[serde(default)]
    pub trending: Vec<MovieSummary>,
    #[serde(default)]
    pub popular: Vec<MovieSummary>,
}

/// Everything the movie page shows: the record, ratings and comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    /// Average of user ratings; `0.0` when nobody has rated yet.
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub user_rating_average: f64,
    /// The current user's own rating, if logged in and rated.
    #[serde(default, deserialize_with = "opt_rating")]
    pub user_rating: Option<Rating>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Stored ratings outside `1..=5` are treated as "not rated".
fn opt_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient::opt_i64(deserializer).map(|v| v.and_then(|stars| Rating::new(stars).ok()))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
