//! Lenient numeric deserialisers.
//!
//! Aggregates computed by the backend (averages, counts) arrive either as
//! JSON numbers or as decimal strings such as `"3.50"`, depending on the
//! column type. These adapters accept both and map blanks to `None`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => round_finite(*f),
            Self::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(round_finite))
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_finite(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.round() as i64)
}

/// Deserialise an optional `f64` from a number, numeric string or `null`.
///
/// # Errors
///
/// Fails only if the value is of an unsupported JSON type.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(NumberOrString::as_f64))
}

/// Deserialise an `f64`, treating `null` and blanks as `0.0`.
///
/// # Errors
///
/// Fails only if the value is of an unsupported JSON type.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_f64(deserializer).map(Option::unwrap_or_default)
}

/// Deserialise an optional `i64` from a number, numeric string or `null`.
///
/// # Errors
///
/// Fails only if the value is of an unsupported JSON type.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(NumberOrString::as_i64))
}

/// Deserialise an optional `u32`; negative or oversized values decode to `None`.
///
/// # Errors
///
/// Fails only if the value is of an unsupported JSON type.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_i64(deserializer).map(|v| v.and_then(|i| u32::try_from(i).ok()))
}
