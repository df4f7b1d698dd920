//! Star rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value lies outside `1..=5`.
    #[error("rating must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Rejected value.
        value: i64,
        /// Lowest accepted value.
        min: u8,
        /// Highest accepted value.
        max: u8,
    },
    /// The input is not a whole number.
    #[error("rating must be a whole number: {0}")]
    NotANumber(String),
}

/// A user's star rating for a movie.
///
/// ## Constraints
///
/// - Whole stars only
/// - Between 1 and 5 inclusive
///
/// ## Examples
///
/// ```
/// use mymovielist_core::Rating;
///
/// assert!(Rating::new(4).is_ok());
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// assert!("3".parse::<Rating>().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Create a rating from a star count.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `stars` is not in `1..=5`.
    pub fn new(stars: i64) -> Result<Self, RatingError> {
        u8::try_from(stars)
            .ok()
            .filter(|s| (Self::MIN..=Self::MAX).contains(s))
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                value: stars,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stars = s
            .trim()
            .parse::<i64>()
            .map_err(|_| RatingError::NotANumber(s.to_owned()))?;
        Self::new(stars)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(stars: i64) -> Result<Self, Self::Error> {
        Self::new(stars)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
