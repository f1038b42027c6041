//! Search-excerpt extraction.
//!
//! Reduces markdown to plain prose and derives either a leading preview or
//! a query-centered snippet. The plain text also ships in the payload as
//! the client-side search corpus.

use std::sync::LazyLock;

use regex::Regex;

/// Leading preview length in characters.
const LEAD_CHARS: usize = 220;
/// Minimum word-boundary cut position for the leading preview.
const LEAD_MIN_CUT: usize = 100;
/// Context window before a query hit, in characters.
const WINDOW_BEFORE: usize = 90;
/// Minimum context window after a query hit, in characters.
const WINDOW_AFTER_MIN: usize = 70;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static RAW_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static IMAGE_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static REF_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\[[^\]]*\]").unwrap());
static LINK_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[[^\]]+\]:\s+\S+.*$").unwrap());
static MD_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[\w./-]+\.md\b").unwrap());
static CODE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static EMPHASIS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*|__|\*|_)").unwrap());
static BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\[\]()]").unwrap());
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s{0,3}#{1,6}\s*").unwrap());
static BLOCKQUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s{0,3}>\s?").unwrap());
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s{0,3}[-*+]\s+").unwrap());
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s{0,3}\d+[.)]\s+").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markdown down to plain prose.
///
/// Removes fenced code blocks, raw tags, image/link syntax (keeping link
/// text), reference-style link definitions, markdown file names, inline
/// code markers, emphasis markers, and heading/blockquote/list markers,
/// then collapses whitespace.
#[must_use]
pub fn plain_text(markdown: &str) -> String {
    let text = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let text = FENCED_BLOCK.replace_all(&text, " ");
    let text = RAW_TAG.replace_all(&text, " ");
    let text = IMAGE_SYNTAX.replace_all(&text, "$1");
    let text = LINK_SYNTAX.replace_all(&text, "$1");
    let text = REF_LINK.replace_all(&text, "$1");
    let text = LINK_DEFINITION.replace_all(&text, " ");
    let text = MD_FILENAME.replace_all(&text, " ");
    let text = CODE_MARKER.replace_all(&text, "$1");
    let text = EMPHASIS_MARKER.replace_all(&text, "");
    let text = BRACKET.replace_all(&text, " ");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = BLOCKQUOTE_MARKER.replace_all(&text, "");
    let text = BULLET_MARKER.replace_all(&text, "");
    let text = ORDERED_MARKER.replace_all(&text, "");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_owned()
}

/// Derive a short preview or query-centered snippet from markdown.
///
/// Without a query, the leading ~220 characters are returned, cut back to
/// the nearest preceding word boundary with a trailing ellipsis when
/// truncated. With a query, a window around the first case-insensitive hit
/// is returned, expanded outward to word boundaries and marked with an
/// ellipsis at each truncated end. An unmatched query falls back to the
/// no-query behavior.
#[must_use]
pub fn excerpt(markdown: &str, query: Option<&str>) -> String {
    let plain = plain_text(markdown);
    if plain.is_empty() {
        return String::new();
    }

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => query_window(&plain, q).unwrap_or_else(|| leading(&plain)),
        None => leading(&plain),
    }
}

/// Leading preview, truncated at a word boundary.
fn leading(plain: &str) -> String {
    let Some((cut_at, _)) = plain.char_indices().nth(LEAD_CHARS) else {
        return plain.to_owned();
    };

    let mut lead = &plain[..cut_at];
    if let Some(space) = lead.rfind(' ') {
        if lead[..space].chars().count() > LEAD_MIN_CUT {
            lead = &lead[..space];
        }
    }
    format!("{}...", lead.trim())
}

/// Snippet centered on the first case-insensitive query hit.
fn query_window(plain: &str, query: &str) -> Option<String> {
    let haystack = plain.to_lowercase();
    let needle = query.to_lowercase();
    let mut hit = haystack.find(&needle)?;

    // Lowercasing can shift byte offsets for non-ASCII text; clamp back to
    // the nearest char boundary of the original string.
    hit = hit.min(plain.len());
    while !plain.is_char_boundary(hit) {
        hit -= 1;
    }

    let after = WINDOW_AFTER_MIN.max(query.chars().count()) + WINDOW_BEFORE;
    let mut start = back_chars(plain, hit, WINDOW_BEFORE);
    let mut end = fwd_chars(plain, hit, after);

    // Expand outward to the nearest word boundary.
    if start > 0 {
        if let Some(space) = plain[..start].rfind(' ') {
            start = space + 1;
        }
    }
    if end < plain.len() {
        if let Some(space) = plain[end..].find(' ') {
            end += space;
        }
    }

    let mut snippet = plain[start..end].trim().to_owned();
    if start > 0 {
        snippet = format!("...{snippet}");
    }
    if end < plain.len() {
        snippet = format!("{snippet}...");
    }
    Some(snippet)
}

/// Byte index `n` chars before `from` (a char boundary), clamped to 0.
fn back_chars(s: &str, from: usize, n: usize) -> usize {
    let mut idx = from;
    for _ in 0..n {
        match s[..idx].char_indices().next_back() {
            Some((i, _)) => idx = i,
            None => return 0,
        }
    }
    idx
}

/// Byte index `n` chars after `from` (a char boundary), clamped to the end.
fn fwd_chars(s: &str, from: usize, n: usize) -> usize {
    match s[from..].char_indices().nth(n) {
        Some((offset, _)) => from + offset,
        None => s.len(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_strips_block_markup() {
        let md = "# Title\n\n> quoted\n\n- item one\n\n1. numbered\n\n```\ncode here\n```\n";
        assert_eq!(plain_text(md), "Title quoted item one numbered");
    }

    #[test]
    fn test_plain_text_keeps_link_text() {
        assert_eq!(
            plain_text("See [the guide](guide.html) and ![diagram](d.png)."),
            "See the guide and diagram."
        );
    }

    #[test]
    fn test_plain_text_drops_md_filenames_and_tags() {
        assert_eq!(
            plain_text("Read setup.md or <img src=\"x.png\"> now"),
            "Read or now"
        );
    }

    #[test]
    fn test_plain_text_unwraps_inline_markers() {
        assert_eq!(
            plain_text("use `cargo` with **force** and _care_"),
            "use cargo with force and care"
        );
    }

    #[test]
    fn test_plain_text_drops_reference_definitions() {
        assert_eq!(
            plain_text("see [docs][ref]\n\n[ref]: https://example.com"),
            "see docs"
        );
    }

    #[test]
    fn test_short_text_returned_whole() {
        assert_eq!(excerpt("tiny page", None), "tiny page");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(excerpt("", None), "");
    }

    #[test]
    fn test_leading_excerpt_truncates_at_word_boundary() {
        let md = "word ".repeat(100);
        let lead = excerpt(&md, None);

        assert!(lead.ends_with("..."));
        let body = lead.trim_end_matches("...");
        assert!(body.chars().count() <= LEAD_CHARS);
        assert!(body.ends_with("word"));
    }

    #[test]
    fn test_query_snippet_centered_with_ellipses() {
        let filler = "lorem ipsum dolor sit amet ".repeat(20);
        let md = format!("{filler}the quick brown fox jumps over the lazy dog {filler}");

        let snippet = excerpt(&md, Some("fox"));

        assert!(snippet.contains("fox"));
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        // Window boundaries land on word boundaries.
        assert!(snippet.contains("quick brown fox jumps"));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let filler = "x ".repeat(200);
        let md = format!("{filler}Needle{filler}");
        assert!(excerpt(&md, Some("nEeDlE")).contains("Needle"));
    }

    #[test]
    fn test_query_miss_falls_back_to_leading() {
        let md = "word ".repeat(100);
        assert_eq!(excerpt(&md, Some("absent")), excerpt(&md, None));
    }

    #[test]
    fn test_query_near_start_has_no_leading_ellipsis() {
        let md = format!("needle {}", "tail ".repeat(100));
        let snippet = excerpt(&md, Some("needle"));
        assert!(snippet.starts_with("needle"));
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let md = format!("{} héllo wörld {}", "é".repeat(300), "ü".repeat(300));
        let snippet = excerpt(&md, Some("wörld"));
        assert!(snippet.contains("wörld"));
    }
}
