//! Cross-reference rewriting for rendered documents.
//!
//! After a document is rendered, every `href=` and `src=` attribute is
//! re-targeted into the site's addressing scheme:
//!
//! - reserved manual-assets API URLs become relative `./assets/` paths
//! - relative links to markdown documents become client-side `#doc=<slug>`
//!   routes
//! - relative links to files under the assets or pages roots become
//!   relative `./assets/` / `./pages/` paths
//! - external URLs, anchors, and root-absolute URLs pass through untouched
//!
//! Relative targets are resolved against the document's own directory and
//! must stay inside the compiled corpus (pages root or assets root); a link
//! that cannot be resolved or escapes the corpus is left unchanged rather
//! than emitted as a broken or unsafe reference.
//!
//! Screenshot capture directives (`data-source` attributes) are consumed by
//! an external build step and stripped from compiled output here.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;
use std::{fs, io};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

use crate::escape::escape_attr;

/// Reserved API prefix for manually managed assets.
const MANUAL_ASSETS_PREFIX: &str = "/api/manual/assets/";

/// Everything except unreserved characters and `/` is percent-encoded.
const PATH_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

static LINK_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(href|src)="([^"]+)""#).unwrap());
static CAPTURE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sdata-source\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

/// Rewrites cross-document references in rendered HTML.
pub struct LinkRewriter {
    pages_root: PathBuf,
    assets_root: PathBuf,
}

impl LinkRewriter {
    /// Create a rewriter for the given pages and assets roots.
    ///
    /// Both roots are canonicalized up front so that resolved link targets
    /// can be compared against them (symlinks included).
    ///
    /// # Errors
    ///
    /// Returns an error if either root cannot be canonicalized.
    pub fn new(pages_root: &Path, assets_root: &Path) -> io::Result<Self> {
        Ok(Self {
            pages_root: fs::canonicalize(pages_root)?,
            assets_root: fs::canonicalize(assets_root)?,
        })
    }

    /// Rewrite all link attributes in one rendered document.
    ///
    /// `doc_path` is the source file the HTML was rendered from; relative
    /// links resolve against its parent directory.
    #[must_use]
    pub fn rewrite(&self, html: &str, doc_path: &Path) -> String {
        let doc_dir = doc_path.parent().unwrap_or(Path::new(""));

        let rewritten = LINK_ATTR.replace_all(html, |caps: &Captures<'_>| {
            match self.rewrite_url(&caps[2], doc_dir) {
                Some(url) => format!(r#"{}="{url}""#, &caps[1]),
                None => caps[0].to_owned(),
            }
        });

        // Strip screenshot build directives from compiled output.
        CAPTURE_DIRECTIVE.replace_all(&rewritten, "").into_owned()
    }

    /// Rewrite a single URL, or `None` to leave it unchanged.
    fn rewrite_url(&self, url: &str, doc_dir: &Path) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        if let Some(rel) = url.strip_prefix(MANUAL_ASSETS_PREFIX) {
            return Some(format!("./assets/{}", escape_attr(rel)));
        }

        // External URLs, mail/tel links, and same-page anchors pass through.
        if url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with("mailto:")
            || url.starts_with("tel:")
            || url.starts_with('#')
        {
            return None;
        }

        // Root-absolute URLs are the hosting environment's business.
        if url.starts_with('/') {
            return None;
        }

        // Canonicalization fails for targets that do not exist, which folds
        // the "leave dead links alone" rule into the same path.
        let Ok(resolved) = fs::canonicalize(doc_dir.join(url)) else {
            return None;
        };

        // Containment: the resolved target must stay inside the compiled
        // corpus. Anything else (e.g. ../../../etc/passwd) is rejected.
        if !resolved.starts_with(&self.pages_root) && !resolved.starts_with(&self.assets_root) {
            tracing::warn!(url = %url, "link escapes the source tree, leaving unchanged");
            return None;
        }

        if !resolved.is_file() {
            return None;
        }

        if resolved.extension().is_some_and(|e| e == "md") {
            if let Ok(rel) = resolved.strip_prefix(&self.pages_root) {
                let slug = to_url_path(rel);
                let slug = slug.strip_suffix(".md").unwrap_or(&slug);
                return Some(format!("#doc={}", escape_attr(slug)));
            }
        }

        if let Ok(rel) = resolved.strip_prefix(&self.assets_root) {
            let url_path = to_url_path(rel);
            let encoded = utf8_percent_encode(&url_path, PATH_ENCODE);
            return Some(format!("./assets/{encoded}"));
        }

        if let Ok(rel) = resolved.strip_prefix(&self.pages_root) {
            let url_path = to_url_path(rel);
            let encoded = utf8_percent_encode(&url_path, PATH_ENCODE);
            return Some(format!("./pages/{encoded}"));
        }

        None
    }
}

/// Forward-slash path string from normal path components.
fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
