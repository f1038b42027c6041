//! Per-page render pipeline.
//!
//! Ties the renderer crate to the compile phase: markdown in, a fully
//! compiled [`Page`] out (rendered HTML with rewritten links, plain-text
//! search corpus, excerpt).

use std::fs;
use std::io;
use std::path::Path;

use docpress_renderer::{LinkRewriter, RenderEngine, select_engine};

use crate::excerpt::{excerpt, plain_text};
use crate::page::Page;
use crate::scanner::PageSource;

/// Renders scanned sources into compiled pages.
///
/// Holds the selected render engine and the link rewriter so both are set
/// up once per compile and shared across worker threads.
pub struct PageRenderer {
    engine: Box<dyn RenderEngine>,
    links: LinkRewriter,
}

impl PageRenderer {
    /// Both roots must exist; they anchor link containment checks.
    pub fn new(pages_root: &Path, assets_root: &Path) -> io::Result<Self> {
        Ok(Self {
            engine: select_engine(),
            links: LinkRewriter::new(pages_root, assets_root)?,
        })
    }

    /// Name of the active render engine.
    #[must_use]
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Compile one source document.
    ///
    /// A file that became unreadable between scan and render degrades to
    /// empty content rather than failing the whole build.
    #[must_use]
    pub fn render(&self, source: &PageSource) -> Page {
        let markdown = match fs::read_to_string(&source.abs_path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %source.abs_path.display(),
                    error = %e,
                    "failed to read page, emitting empty content"
                );
                String::new()
            }
        };

        let html = self.engine.render(&markdown);
        let html = self.links.rewrite(&html, &source.abs_path);

        Page {
            slug: source.slug.clone(),
            path: source.rel_path.clone(),
            title: source.title.clone(),
            order: source.order,
            html,
            plain: plain_text(&markdown),
            excerpt: excerpt(&markdown, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scanner::scan_pages;

    fn fixture() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("pages");
        let assets = dir.path().join("assets");
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&assets).unwrap();
        (dir, pages, assets)
    }

    #[test]
    fn test_render_produces_html_plain_and_excerpt() {
        let (_dir, pages, assets) = fixture();
        fs::write(pages.join("intro.md"), "# Intro\n\nHello **world**.\n").unwrap();

        let renderer = PageRenderer::new(&pages, &assets).unwrap();
        let sources = scan_pages(&pages);
        let page = renderer.render(&sources[0]);

        assert_eq!(page.slug, "intro");
        assert!(page.html.contains("<h1>"));
        assert!(page.html.contains("<strong>world</strong>"));
        assert_eq!(page.plain, "Intro Hello world.");
        assert_eq!(page.excerpt, "Intro Hello world.");
    }

    #[test]
    fn test_render_rewrites_sibling_links() {
        let (_dir, pages, assets) = fixture();
        fs::write(pages.join("a.md"), "# A\n\n[next](b.md)\n").unwrap();
        fs::write(pages.join("b.md"), "# B\n").unwrap();

        let renderer = PageRenderer::new(&pages, &assets).unwrap();
        let sources = scan_pages(&pages);
        let page = renderer.render(&sources[0]);

        assert!(page.html.contains("href=\"#doc=b\""), "html: {}", page.html);
    }

    #[test]
    fn test_missing_source_degrades_to_empty_page() {
        let (_dir, pages, assets) = fixture();
        fs::write(pages.join("gone.md"), "# Gone\n").unwrap();

        let renderer = PageRenderer::new(&pages, &assets).unwrap();
        let sources = scan_pages(&pages);
        fs::remove_file(pages.join("gone.md")).unwrap();
        let page = renderer.render(&sources[0]);

        assert_eq!(page.title, "Gone");
        assert!(page.html.is_empty());
        assert!(page.plain.is_empty());
        assert!(page.excerpt.is_empty());
    }
}
