//! Page discovery by filesystem walking.
//!
//! The scanner walks the pages root and produces one [`PageSource`] per
//! markdown file. Only discovery and title extraction happen here; content
//! rendering is the compile phase's job. Directory entries are visited in
//! name order so discovery order is deterministic across runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::order::{ordered_name, title_case};

/// Reference to one discovered markdown source file.
#[derive(Debug, Clone)]
pub struct PageSource {
    /// Source-relative path with extension stripped, `/`-separated.
    pub slug: String,
    /// Source-relative path including extension, `/`-separated.
    pub rel_path: String,
    /// Absolute path to the source file.
    pub abs_path: PathBuf,
    /// Display title (first H1 of the file, else filename-derived).
    pub title: String,
    /// Sort key from the filename's numeric prefix.
    pub order: i64,
}

/// Recursively discover every markdown file under `pages_root`.
///
/// Hidden files and directories (leading `.`) are skipped. An unreadable
/// file degrades to a filename-derived title rather than aborting the scan.
#[must_use]
pub fn scan_pages(pages_root: &Path) -> Vec<PageSource> {
    let mut sources = Vec::new();
    if pages_root.is_dir() {
        scan_directory(pages_root, "", &mut sources);
    }
    sources
}

fn scan_directory(dir: &Path, rel_prefix: &str, sources: &mut Vec<PageSource>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "failed to read directory, skipping");
        return;
    };

    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let rel = if rel_prefix.is_empty() {
            name.clone()
        } else {
            format!("{rel_prefix}/{name}")
        };

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel, sources);
        } else if path.extension().is_some_and(|e| e == "md") {
            sources.push(build_source(&path, &rel));
        }
    }
}

fn build_source(path: &Path, rel_path: &str) -> PageSource {
    let slug = rel_path.strip_suffix(".md").unwrap_or(rel_path).to_owned();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (order, _) = ordered_name(&stem);

    PageSource {
        slug,
        rel_path: rel_path.to_owned(),
        abs_path: path.to_path_buf(),
        title: extract_title(path, &stem),
        order,
    }
}

/// Title from the file's first H1 heading, else from the filename stem.
fn extract_title(path: &Path, stem: &str) -> String {
    let stem_title = title_case(&ordered_name(stem).1);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read page, using filename title");
            return stem_title;
        }
    };

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(text) = trimmed.strip_prefix("# ") {
            let heading = ordered_name(text.trim()).1;
            if !heading.is_empty() {
                return heading;
            }
            return stem_title;
        }
    }

    stem_title
}
