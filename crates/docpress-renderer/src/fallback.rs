//! Built-in fallback markdown engine.
//!
//! A single-pass, line-oriented state machine used when the standard
//! pulldown-cmark engine is not compiled in. It covers the subset of
//! markdown the documentation corpus actually uses: headings, paragraphs,
//! flat lists, fenced code blocks, raw HTML blocks, and the inline span
//! syntax (code, bold, italic, images, links).
//!
//! Nested or indentation-based mixed lists are not supported; a list line
//! always continues or replaces the current flat list.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::engine::RenderEngine;
use crate::escape::{escape_attr, escape_html};

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());
static ORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());
static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Kind of list currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Block-level machine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
    /// Between blocks; a paragraph buffer may be accumulating.
    #[default]
    Normal,
    /// Inside an open `<ul>` or `<ol>`.
    List(ListKind),
    /// Inside a fenced code block.
    Code,
    /// Inside a multi-line raw HTML block.
    RawBlock,
}

/// Built-in fallback engine.
pub struct FallbackEngine;

impl RenderEngine for FallbackEngine {
    fn render(&self, markdown: &str) -> String {
        Machine::default().run(markdown)
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// Apply inline transforms to already block-classified text.
///
/// The raw text is HTML-escaped first; span syntax is then recognized on
/// the escaped text, with URLs and alt text attribute-escaped.
fn inline(text: &str) -> String {
    let escaped = escape_html(text);
    let out = CODE_SPAN.replace_all(&escaped, "<code>$1</code>");
    let out = BOLD.replace_all(&out, "<strong>$1</strong>");
    let out = ITALIC.replace_all(&out, "<em>$1</em>");
    let out = IMAGE.replace_all(&out, |caps: &Captures<'_>| {
        format!(
            r#"<img alt="{}" src="{}">"#,
            escape_attr(&caps[1]),
            escape_attr(&caps[2])
        )
    });
    let out = LINK.replace_all(&out, |caps: &Captures<'_>| {
        format!(r#"<a href="{}">{}</a>"#, escape_attr(&caps[2]), &caps[1])
    });
    out.into_owned()
}

#[derive(Default)]
struct Machine {
    out: String,
    state: State,
    paragraph: Vec<String>,
    code_lines: Vec<String>,
    raw_lines: Vec<String>,
}

impl Machine {
    fn run(mut self, markdown: &str) -> String {
        let text = markdown.replace("\r\n", "\n").replace('\r', "\n");

        for raw in text.split('\n') {
            self.line(raw.trim_end());
        }
        self.finish();
        self.out
    }

    fn line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Fence markers toggle code state from anywhere except a raw block.
        if trimmed.starts_with("```") && self.state != State::RawBlock {
            if self.state == State::Code {
                self.emit_code_block();
            } else {
                self.flush_paragraph();
                self.close_list();
                self.code_lines.clear();
                self.state = State::Code;
            }
            return;
        }

        if self.state == State::Code {
            self.code_lines.push(line.to_owned());
            return;
        }

        if self.state == State::RawBlock {
            self.raw_lines.push(line.to_owned());
            if line.contains('>') {
                self.out.push_str(&self.raw_lines.join("\n"));
                self.raw_lines.clear();
                self.state = State::Normal;
            }
            return;
        }

        if trimmed.is_empty() {
            self.flush_paragraph();
            self.close_list();
            return;
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            self.flush_paragraph();
            self.close_list();
            let level = caps[1].len();
            let body = inline(caps[2].trim());
            self.out.push_str(&format!("<h{level}>{body}</h{level}>"));
            return;
        }

        if let Some(caps) = BULLET.captures(line) {
            self.list_item(ListKind::Unordered, caps[1].trim());
            return;
        }

        if let Some(caps) = ORDERED.captures(line) {
            self.list_item(ListKind::Ordered, caps[1].trim());
            return;
        }

        if trimmed.starts_with('<') {
            if trimmed.ends_with('>') {
                // Single-line element tag is emitted verbatim.
                self.flush_paragraph();
                self.close_list();
                self.out.push_str(line);
            } else {
                // Tag opened but not closed on this line: buffer verbatim
                // until a closing `>` is seen.
                self.flush_paragraph();
                self.close_list();
                self.raw_lines.clear();
                self.raw_lines.push(line.to_owned());
                self.state = State::RawBlock;
            }
            return;
        }

        self.paragraph.push(trimmed.to_owned());
    }

    fn list_item(&mut self, kind: ListKind, text: &str) {
        self.flush_paragraph();
        match self.state {
            State::List(open) if open == kind => {}
            State::List(_) => {
                // Switching list kinds closes the open one first.
                self.close_list();
                self.open_list(kind);
            }
            _ => self.open_list(kind),
        }
        self.out.push_str(&format!("<li>{}</li>", inline(text)));
    }

    fn open_list(&mut self, kind: ListKind) {
        self.out.push_str(match kind {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        });
        self.state = State::List(kind);
    }

    fn close_list(&mut self) {
        if let State::List(kind) = self.state {
            self.out.push_str(match kind {
                ListKind::Unordered => "</ul>",
                ListKind::Ordered => "</ol>",
            });
            self.state = State::Normal;
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.out
            .push_str(&format!("<p>{}</p>", inline(text.trim())));
    }

    fn emit_code_block(&mut self) {
        let body = escape_html(&self.code_lines.join("\n"));
        self.code_lines.clear();
        self.out.push_str(&format!("<pre><code>{body}</code></pre>"));
        self.state = State::Normal;
    }

    fn finish(&mut self) {
        match self.state {
            State::Code => self.emit_code_block(),
            State::RawBlock => {
                if !self.raw_lines.is_empty() {
                    self.out.push_str(&self.raw_lines.join("\n"));
                    self.raw_lines.clear();
                }
                self.state = State::Normal;
            }
            State::Normal | State::List(_) => {}
        }
        self.flush_paragraph();
        self.close_list();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> String {
        FallbackEngine.render(markdown)
    }

    #[test]
    fn test_paragraph_joins_consecutive_lines() {
        assert_eq!(render("one\ntwo"), "<p>one two</p>");
    }

    #[test]
    fn test_blank_line_splits_paragraphs() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("# Title"), "<h1>Title</h1>");
        assert_eq!(render("### Sub"), "<h3>Sub</h3>");
        assert_eq!(render("###### Deep"), "<h6>Deep</h6>");
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        assert_eq!(render("####### nope"), "<p>####### nope</p>");
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(render("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn test_switching_list_kind_closes_previous() {
        assert_eq!(
            render("- a\n1. b"),
            "<ul><li>a</li></ul><ol><li>b</li></ol>"
        );
    }

    #[test]
    fn test_blank_line_closes_list() {
        assert_eq!(render("- a\n\ntext"), "<ul><li>a</li></ul><p>text</p>");
    }

    #[test]
    fn test_fenced_code_block_escapes_content() {
        assert_eq!(
            render("```\n<b>&\n```"),
            "<pre><code>&lt;b&gt;&amp;</code></pre>"
        );
    }

    #[test]
    fn test_code_block_ignores_markup_inside() {
        let html = render("```\n# not a heading\n- not a list\n```");
        assert_eq!(
            html,
            "<pre><code># not a heading\n- not a list</code></pre>"
        );
    }

    #[test]
    fn test_unclosed_code_block_flushed_at_eof() {
        assert_eq!(render("```\ndangling"), "<pre><code>dangling</code></pre>");
    }

    #[test]
    fn test_single_line_tag_verbatim() {
        assert_eq!(render("<hr>"), "<hr>");
    }

    #[test]
    fn test_raw_block_buffered_until_close() {
        let html = render("<img src=\"a.png\"\n  alt=\"x\">\nafter");
        assert_eq!(html, "<img src=\"a.png\"\n  alt=\"x\"><p>after</p>");
    }

    #[test]
    fn test_unclosed_raw_block_flushed_at_eof() {
        assert_eq!(render("<div class=\"x\""), "<div class=\"x\"");
    }

    #[test]
    fn test_inline_code_span() {
        assert_eq!(render("use `cargo`"), "<p>use <code>cargo</code></p>");
    }

    #[test]
    fn test_inline_bold_and_italic() {
        assert_eq!(
            render("**bold** and *em*"),
            "<p><strong>bold</strong> and <em>em</em></p>"
        );
    }

    #[test]
    fn test_inline_link() {
        assert_eq!(
            render("[home](https://example.com)"),
            r#"<p><a href="https://example.com">home</a></p>"#
        );
    }

    #[test]
    fn test_inline_image() {
        assert_eq!(
            render("![alt](img.png)"),
            r#"<p><img alt="alt" src="img.png"></p>"#
        );
    }

    #[test]
    fn test_inline_text_is_escaped() {
        assert_eq!(render("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_heading_with_inline_markup() {
        assert_eq!(render("## Use `make`"), "<h2>Use <code>make</code></h2>");
    }

    #[test]
    fn test_list_item_with_link() {
        assert_eq!(
            render("- [a](b.md)"),
            r#"<ul><li><a href="b.md">a</a></li></ul>"#
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("one\r\n\r\ntwo"), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }
}
