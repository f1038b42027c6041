//! Whole-site compilation.
//!
//! [`SiteCompiler`] orchestrates a build: validates the source layout,
//! copies the shared stylesheet, scans and renders every page, assembles
//! the payload, and emits `site-data.json` plus `index.html` atomically.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::page::SitePayload;
use crate::render::PageRenderer;
use crate::scanner::{PageSource, scan_pages};
use crate::shell::render_shell;
use crate::tree::build_tree;

/// Errors that abort a site build.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("pages directory not found: {0}")]
    PagesRootMissing(PathBuf),

    #[error("assets directory not found: {0}")]
    AssetsRootMissing(PathBuf),

    #[error("required client asset missing: {0}")]
    ClientAssetMissing(PathBuf),

    #[error("no markdown files found under {0}")]
    EmptyCorpus(PathBuf),

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("payload serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub page_count: usize,
    pub data_path: PathBuf,
    pub html_path: PathBuf,
}

/// One-shot site compiler rooted at the docs directory.
///
/// Expects `<root>/pages/` with markdown sources and `<root>/assets/` with
/// the client stylesheet and script. Outputs land next to them in `<root>`.
pub struct SiteCompiler {
    root: PathBuf,
    website_root: Option<PathBuf>,
    title: String,
}

impl SiteCompiler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            website_root: None,
            title: "Documentation".to_owned(),
        }
    }

    /// Directory holding the shared `style.css` to copy into the site.
    #[must_use]
    pub fn with_website_root(mut self, website_root: Option<PathBuf>) -> Self {
        self.website_root = website_root;
        self
    }

    /// Site title shown in the shell.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Run a full build.
    ///
    /// Both output artifacts are written atomically, and the payload is
    /// serialized before either write starts, so a failed build never
    /// leaves a mixed old/new pair behind.
    pub fn compile(&self) -> Result<BuildSummary, CompileError> {
        let pages_root = self.root.join("pages");
        let assets_root = self.root.join("assets");

        if !pages_root.is_dir() {
            return Err(CompileError::PagesRootMissing(pages_root));
        }
        if !assets_root.is_dir() {
            return Err(CompileError::AssetsRootMissing(assets_root));
        }

        let css_dir = assets_root.join("css");
        let js_dir = assets_root.join("js");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;

        self.copy_site_stylesheet(&css_dir)?;

        for required in [css_dir.join("docs.css"), js_dir.join("main.js")] {
            if !required.is_file() {
                return Err(CompileError::ClientAssetMissing(required));
            }
        }

        let sources = scan_pages(&pages_root);
        if sources.is_empty() {
            return Err(CompileError::EmptyCorpus(pages_root));
        }

        let renderer = PageRenderer::new(&pages_root, &assets_root)?;
        tracing::info!(
            pages = sources.len(),
            engine = renderer.engine_name(),
            "rendering corpus"
        );
        let pages = sources
            .par_iter()
            .map(|source| renderer.render(source))
            .collect();

        let now = Utc::now();
        let payload = SitePayload {
            generated_at: now.to_rfc3339(),
            default_slug: default_slug(&sources),
            tree: build_tree(&sources),
            pages,
        };

        let payload_json = serde_json::to_string(&payload)?;
        let updated_label = now.format("%Y-%m-%d %H:%M UTC").to_string();
        let html = render_shell(&payload_json, &updated_label, &self.title);

        let data_path = self.root.join("site-data.json");
        let html_path = self.root.join("index.html");
        let data_staged = stage(&data_path, &payload_json)?;
        let html_staged = stage(&html_path, &html)?;
        data_staged.persist(&data_path).map_err(|e| e.error)?;
        html_staged.persist(&html_path).map_err(|e| e.error)?;

        Ok(BuildSummary {
            page_count: payload.pages.len(),
            data_path,
            html_path,
        })
    }

    /// Copy the website's `style.css` into the site assets when configured.
    /// Absence of either the root or the file is not an error.
    fn copy_site_stylesheet(&self, css_dir: &Path) -> io::Result<()> {
        let Some(website_root) = &self.website_root else {
            return Ok(());
        };
        let source = website_root.join("style.css");
        if source.is_file() {
            fs::copy(&source, css_dir.join("style.css"))?;
        }
        Ok(())
    }
}

/// Landing page selection: a root-level `README`, else any page whose leaf
/// name is `readme` in any case, else the first discovered page.
fn default_slug(sources: &[PageSource]) -> String {
    sources
        .iter()
        .find(|s| s.slug == "README")
        .or_else(|| {
            sources.iter().find(|s| {
                s.slug
                    .rsplit('/')
                    .next()
                    .is_some_and(|leaf| leaf.eq_ignore_ascii_case("readme"))
            })
        })
        .unwrap_or(&sources[0])
        .slug
        .clone()
}

/// Stage content in a temporary file in the destination directory, ready
/// to be renamed into place. Both artifacts are staged before either is
/// persisted, so readers never observe a partially written or mixed pair.
fn stage(path: &Path, contents: &str) -> io::Result<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}
