//! Ordering resolver for file and folder names.
//!
//! Authors control sidebar ordering with numeric filename prefixes
//! (`01-intro.md`, `3_Getting Started`, `2) setup`). [`ordered_name`] maps a
//! raw stem to its `(sort order, display name)` pair; names without a prefix
//! sort after all numbered ones.

use std::sync::LazyLock;

use regex::Regex;

/// Sort order assigned to names without a numeric prefix.
pub const UNNUMBERED_ORDER: i64 = 10_000;

static ORDERED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*[-_. )]+\s*(.*)$").unwrap());

/// Derive a `(sort order, display name)` pair from a raw file or folder stem.
///
/// A stem matching `<digits><separators><rest>` (separators: hyphen,
/// underscore, period, space, closing parenthesis, in any mixture) yields
/// the digits as order and the humanized rest as name; if the rest is empty
/// the whole original stem is kept. Anything else yields
/// [`UNNUMBERED_ORDER`] and the humanized stem.
///
/// This function is pure and total.
///
/// # Examples
///
/// ```
/// use docpress_compiler::ordered_name;
///
/// assert_eq!(ordered_name("01-intro"), (1, "intro".to_owned()));
/// assert_eq!(ordered_name("3_Getting Started"), (3, "Getting Started".to_owned()));
/// assert_eq!(ordered_name("Getting Started"), (10_000, "Getting Started".to_owned()));
/// ```
#[must_use]
pub fn ordered_name(raw: &str) -> (i64, String) {
    let text = raw.trim();

    let Some(caps) = ORDERED_NAME.captures(text) else {
        let clean = humanize(text);
        let name = if clean.is_empty() { text } else { &clean };
        return (UNNUMBERED_ORDER, name.to_owned());
    };

    // Digit runs beyond i64 range fall back to the unnumbered bucket.
    let Ok(order) = caps[1].parse::<i64>() else {
        return (UNNUMBERED_ORDER, humanize(text));
    };

    let clean = humanize(&caps[2]);
    let name = if clean.is_empty() { text } else { &clean };
    (order, name.to_owned())
}

/// Replace hyphens and underscores with spaces and trim the result.
fn humanize(text: &str) -> String {
    text.replace(['-', '_'], " ").trim().to_owned()
}

/// Uppercase the first letter of each whitespace-separated word.
///
/// Used for filename-derived titles and folder display names.
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_hyphen_prefix() {
        assert_eq!(ordered_name("01-intro"), (1, "intro".to_owned()));
    }

    #[test]
    fn test_underscore_prefix_keeps_inner_spaces() {
        assert_eq!(
            ordered_name("3_Getting Started"),
            (3, "Getting Started".to_owned())
        );
    }

    #[test]
    fn test_no_prefix_sorts_last() {
        assert_eq!(
            ordered_name("Getting Started"),
            (UNNUMBERED_ORDER, "Getting Started".to_owned())
        );
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(ordered_name("2) setup"), (2, "setup".to_owned()));
        assert_eq!(ordered_name("10. deploy"), (10, "deploy".to_owned()));
        assert_eq!(ordered_name("4 - faq"), (4, "faq".to_owned()));
    }

    #[test]
    fn test_humanizes_hyphens_and_underscores() {
        assert_eq!(
            ordered_name("API_reference-guide"),
            (UNNUMBERED_ORDER, "API reference guide".to_owned())
        );
    }

    #[test]
    fn test_empty_rest_falls_back_to_whole_stem() {
        assert_eq!(ordered_name("42-"), (42, "42-".to_owned()));
    }

    #[test]
    fn test_bare_digits_have_no_separator() {
        assert_eq!(ordered_name("42"), (UNNUMBERED_ORDER, "42".to_owned()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(ordered_name(""), (UNNUMBERED_ORDER, String::new()));
    }

    #[test]
    fn test_leading_whitespace_trimmed() {
        assert_eq!(ordered_name("  7. ops  "), (7, "ops".to_owned()));
    }

    #[test]
    fn test_huge_digit_run_is_unnumbered() {
        let (order, _) = ordered_name("99999999999999999999-x");
        assert_eq!(order, UNNUMBERED_ORDER);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("getting started"), "Getting Started");
        assert_eq!(title_case("api"), "Api");
        assert_eq!(title_case(""), "");
    }
}
