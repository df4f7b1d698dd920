//! Text display helpers.

/// Placeholder shown for movies without an overview.
pub const DEFAULT_OVERVIEW: &str = "No description available.";

/// Truncate `text` to at most `limit` characters, appending `...` when
/// anything was cut.
///
/// Counts Unicode scalar values, so multi-byte titles are never split
/// mid-character.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            let mut out = text.get(..byte_idx).unwrap_or(text).to_owned();
            out.push_str("...");
            out
        }
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_with_ellipsis("Dune", 80), "Dune");
        assert_eq!(truncate_with_ellipsis("exactly", 7), "exactly");
    }

    #[test]
    fn test_long_text_cut() {
        assert_eq!(truncate_with_ellipsis("abcdefgh", 3), "abc...");
    }

    #[test]
    fn test_multibyte_boundary() {
        assert_eq!(truncate_with_ellipsis("Amélie Poulain", 4), "Amél...");
    }
}
