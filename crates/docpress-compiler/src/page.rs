//! Compiled page records and the site payload.

use serde::Serialize;

use crate::tree::TreeNode;

/// One compiled source document.
///
/// Created once per compiler run from a scan, immutable thereafter. The
/// `slug` is the primary key used for addressing and link rewriting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Source-relative path with the extension stripped, `/`-separated.
    /// Unique across the corpus.
    pub slug: String,
    /// Source-relative path including the extension.
    pub path: String,
    /// Display title (first H1, else humanized filename).
    pub title: String,
    /// Sort key derived from the filename's numeric prefix.
    pub order: i64,
    /// Rendered, link-rewritten HTML.
    pub html: String,
    /// Markup stripped to plain prose, used for client-side search.
    pub plain: String,
    /// Leading preview of the page content.
    pub excerpt: String,
}

/// The compiled site artifact.
///
/// Field order gives the stable JSON key ordering of the emitted
/// `site-data.json`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SitePayload {
    /// Build timestamp (RFC 3339, UTC).
    pub generated_at: String,
    /// Slug of the landing page.
    pub default_slug: String,
    /// Root-level ordered navigation nodes.
    pub tree: Vec<TreeNode>,
    /// All compiled pages; each carries its own slug, so list order does
    /// not matter to consumers.
    pub pages: Vec<Page>,
}
