//! HTML escaping helpers shared by the engines and the link rewriter.

/// Escape text for use in HTML element content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted HTML attribute value.
#[must_use]
pub fn escape_attr(text: &str) -> String {
    // Same character set; kept separate so call sites document intent.
    escape_html(text)
}
