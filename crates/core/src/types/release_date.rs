//! Release date parsing and normalisation.
//!
//! The backend serialises dates as RFC 1123 strings
//! (`Fri, 16 Jul 2010 00:00:00 GMT`) while the admin console accepts and
//! sends the canonical `YYYY-MM-DD` form. Everything here converts between
//! the two.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ValidationError;

/// Canonical wire format for dates sent to the backend.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a release date in any of the formats the backend or a user may
/// produce.
///
/// Accepts `YYYY-MM-DD`, RFC 1123 / RFC 2822, RFC 3339 and naive
/// `YYYY-MM-DD[T ]HH:MM:SS`. Zoned timestamps are converted to UTC before
/// the date is taken. Returns `None` for blank or unrecognised input.
#[must_use]
pub fn parse_release_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, CANONICAL_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// Normalise user or backend input to `YYYY-MM-DD`.
///
/// Blank input normalises to `None` (sent to the backend as `null`).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if the input is not blank and
/// cannot be parsed as a date.
pub fn normalize_release_date(input: &str) -> Result<Option<String>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_release_date(input)
        .map(|date| Some(date.format(CANONICAL_FORMAT).to_string()))
        .ok_or_else(|| ValidationError::InvalidDate(input.trim().to_owned()))
}

/// Serde adapter for optional release dates.
///
/// Serialises as `YYYY-MM-DD` (or `null`) and deserialises leniently via
/// [`parse_release_date`]: unrecognised strings decode to `None` rather than
/// failing the whole record.
pub mod option {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{CANONICAL_FORMAT, parse_release_date};

    /// Serialise an optional date in canonical form.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(CANONICAL_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialise an optional date from any supported string format.
    ///
    /// # Errors
    ///
    /// Fails only if the value is neither a string nor `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_release_date))
    }
}
