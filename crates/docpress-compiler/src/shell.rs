//! Static HTML shell emission.
//!
//! The shell is a self-contained page that embeds the compiled payload in
//! an inline JSON script tag and carries the DOM hooks the client script
//! binds to (navigation tree, search inputs, article container). All
//! dynamic behavior lives in `assets/js/main.js`, which is authored
//! separately and only referenced here.

use docpress_renderer::escape_html;

/// Render the site shell around an already-serialized payload.
///
/// `updated_label` is the human-readable build time shown in the header;
/// `title` is the configured site title.
#[must_use]
pub fn render_shell(payload_json: &str, updated_label: &str, title: &str) -> String {
    let title = escape_html(title);
    let updated = escape_html(updated_label);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="./assets/css/style.css">
  <link rel="stylesheet" href="./assets/css/docs.css">
</head>
<body>
  <header class="site-header">
    <a class="brand" href="#top">{title}</a>
    <nav class="site-nav" aria-label="Main navigation">
      <span class="docs-updated">Updated {updated}</span>
    </nav>
  </header>

  <main id="top" class="docs-shell">
    <section class="section">
      <h1>{title}</h1>

      <div class="docs-toolbar">
        <button id="docs-sidebar-toggle" class="docs-sidebar-toggle" type="button" aria-expanded="false" aria-controls="docs-sidebar">Docs Menu</button>
        <input type="search" id="docs-search" data-docs-search="desktop" class="docs-search-input docs-search-desktop" placeholder="Search docs..." />
        <span id="docs-search-status" data-docs-search-status="desktop" class="docs-search-status docs-search-status-desktop"></span>
      </div>

      <div class="docs-layout">
        <aside id="docs-sidebar" class="docs-sidebar">
          <div class="docs-sidebar-head">
            <span class="docs-sidebar-title">Docs Menu</span>
            <button id="docs-sidebar-close" class="docs-sidebar-close" type="button" aria-label="Close docs menu">Close</button>
          </div>
          <div class="docs-sidebar-search">
            <input type="search" id="docs-search-mobile" data-docs-search="mobile" class="docs-search-input" placeholder="Search docs..." />
            <span id="docs-search-status-mobile" data-docs-search-status="mobile" class="docs-search-status"></span>
          </div>
          <div id="docs-tree" class="docs-tree"></div>
          <div id="docs-search-results" class="docs-search-results hidden"></div>
        </aside>

        <article class="docs-content">
          <div class="doc-panel" id="docs-article"></div>
        </article>
      </div>
    </section>
  </main>

  <script id="site-data-inline" type="application/json">{payload_json}</script>
  <script src="./assets/js/main.js"></script>
</body>
</html>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_embeds_payload_and_hooks() {
        let shell = render_shell(r#"{"pages":[]}"#, "2026-08-30 12:00 UTC", "My Docs");

        assert!(shell.contains(r#"<script id="site-data-inline" type="application/json">{"pages":[]}</script>"#));
        assert!(shell.contains(r#"id="docs-tree""#));
        assert!(shell.contains(r#"id="docs-search""#));
        assert!(shell.contains(r#"id="docs-article""#));
        assert!(shell.contains(r#"src="./assets/js/main.js""#));
        assert!(shell.contains("Updated 2026-08-30 12:00 UTC"));
    }

    #[test]
    fn test_title_is_escaped() {
        let shell = render_shell("{}", "now", "Docs <&> Co");
        assert!(shell.contains("<title>Docs &lt;&amp;&gt; Co</title>"));
    }
}
