//! Delegation engine backed by pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

use crate::engine::RenderEngine;

/// Standard engine: pulldown-cmark with the tables extension enabled.
///
/// Fenced code blocks are core CommonMark behavior in pulldown-cmark, so
/// only the tables extension needs to be switched on.
pub struct PulldownEngine;

impl RenderEngine for PulldownEngine {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);
        out
    }

    fn name(&self) -> &'static str {
        "pulldown-cmark"
    }
}
