//! Editable movie buffers and the payload sent to the admin endpoints.
//!
//! A [`MovieForm`] holds what an admin has typed so far: text fields as
//! entered, numbers already parsed, the release date still raw. Converting
//! it to a [`MovieDraft`] validates required fields and normalises the
//! date, so nothing invalid ever reaches the request client.

use serde::Serialize;

use crate::{Movie, normalize_release_date};
use crate::types::release_date::CANONICAL_FORMAT;

/// Client-side validation failures. Requests are never sent when one of
/// these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A numeric field holds something that is not a number.
    #[error("invalid number for {field}: {value}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Rejected input.
        value: String,
    },

    /// The field name is not part of a movie record.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A value is syntactically valid but not acceptable.
    #[error("{0}")]
    Invalid(String),
}

/// Editable fields of a movie record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    Title,
    Tagline,
    Overview,
    ReleaseDate,
    Runtime,
    Budget,
    Language,
    CoverUrl,
    VoteAverage,
    VoteCount,
}

impl MovieField {
    /// All fields, in form order.
    pub const ALL: [Self; 10] = [
        Self::Title,
        Self::Tagline,
        Self::ReleaseDate,
        Self::Runtime,
        Self::Budget,
        Self::Language,
        Self::VoteAverage,
        Self::VoteCount,
        Self::CoverUrl,
        Self::Overview,
    ];

    /// Snake-case name used in commands and messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Tagline => "tagline",
            Self::Overview => "overview",
            Self::ReleaseDate => "release_date",
            Self::Runtime => "runtime",
            Self::Budget => "budget",
            Self::Language => "language",
            Self::CoverUrl => "cover_url",
            Self::VoteAverage => "vote_average",
            Self::VoteCount => "vote_count",
        }
    }
}

impl std::fmt::Display for MovieField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MovieField {
    type Err = ValidationError;

    /// Accepts snake_case, camelCase and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "title" => Ok(Self::Title),
            "tagline" => Ok(Self::Tagline),
            "overview" => Ok(Self::Overview),
            "releasedate" | "date" => Ok(Self::ReleaseDate),
            "runtime" => Ok(Self::Runtime),
            "budget" => Ok(Self::Budget),
            "language" => Ok(Self::Language),
            "coverurl" | "cover" => Ok(Self::CoverUrl),
            "voteaverage" => Ok(Self::VoteAverage),
            "votecount" => Ok(Self::VoteCount),
            _ => Err(ValidationError::UnknownField(s.to_owned())),
        }
    }
}

/// An in-progress movie record: the admin creation buffer or edit buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieForm {
    pub title: String,
    pub tagline: String,
    pub overview: String,
    /// Raw date text; normalised to `YYYY-MM-DD` on submission.
    pub release_date: String,
    pub runtime: Option<u32>,
    pub budget: Option<i64>,
    pub language: String,
    pub cover_url: String,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}

impl MovieForm {
    /// Seed an edit buffer from an existing record.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            tagline: movie.tagline.clone().unwrap_or_default(),
            overview: movie.overview.clone().unwrap_or_default(),
            release_date: movie
                .release_date
                .map(|d| d.format(CANONICAL_FORMAT).to_string())
                .unwrap_or_default(),
            runtime: movie.runtime,
            budget: movie.budget,
            language: movie.language.clone().unwrap_or_default(),
            cover_url: movie.cover_url.clone().unwrap_or_default(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
        }
    }

    /// Whether nothing has been entered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Set one field from user input.
    ///
    /// Numeric fields accept blank input as "unset".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidNumber`] if a numeric field cannot
    /// be parsed. The buffer is unchanged on error.
    pub fn set(&mut self, field: MovieField, value: &str) -> Result<(), ValidationError> {
        match field {
            MovieField::Title => value.clone_into(&mut self.title),
            MovieField::Tagline => value.clone_into(&mut self.tagline),
            MovieField::Overview => value.clone_into(&mut self.overview),
            MovieField::ReleaseDate => value.trim().clone_into(&mut self.release_date),
            MovieField::Language => value.clone_into(&mut self.language),
            MovieField::CoverUrl => value.trim().clone_into(&mut self.cover_url),
            MovieField::Runtime => self.runtime = parse_number(field, value)?,
            MovieField::Budget => self.budget = parse_number(field, value)?,
            MovieField::VoteCount => self.vote_count = parse_number(field, value)?,
            MovieField::VoteAverage => self.vote_average = parse_number(field, value)?,
        }
        Ok(())
    }

    /// Current value of a field, formatted for display.
    #[must_use]
    pub fn get(&self, field: MovieField) -> String {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }
        match field {
            MovieField::Title => self.title.clone(),
            MovieField::Tagline => self.tagline.clone(),
            MovieField::Overview => self.overview.clone(),
            MovieField::ReleaseDate => self.release_date.clone(),
            MovieField::Language => self.language.clone(),
            MovieField::CoverUrl => self.cover_url.clone(),
            MovieField::Runtime => opt(self.runtime),
            MovieField::Budget => opt(self.budget),
            MovieField::VoteCount => opt(self.vote_count),
            MovieField::VoteAverage => opt(self.vote_average),
        }
    }

    /// Validate the buffer and build the request payload.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingField`] if the title is blank
    /// - [`ValidationError::InvalidDate`] if the release date cannot be parsed
    pub fn to_draft(&self) -> Result<MovieDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        Ok(MovieDraft {
            title: title.to_owned(),
            tagline: self.tagline.trim().to_owned(),
            overview: self.overview.trim().to_owned(),
            release_date: normalize_release_date(&self.release_date)?,
            runtime: self.runtime,
            budget: self.budget,
            language: self.language.trim().to_owned(),
            cover_url: self.cover_url.trim().to_owned(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    field: MovieField,
    value: &str,
) -> Result<Option<T>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.name(),
            value: value.to_owned(),
        })
}

/// Validated movie payload for `POST /admin/movie` and `PUT /admin/movie/:id`.
///
/// Every field is always sent: the backend replaces the whole record on
/// update, so an omitted field would be cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    pub tagline: String,
    pub overview: String,
    /// `YYYY-MM-DD` or `null`.
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub budget: Option<i64>,
    pub language: String,
    pub cover_url: String,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}
