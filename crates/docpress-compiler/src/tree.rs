//! Navigation tree construction.
//!
//! The flat page list is inserted node-by-path into an owned builder tree
//! (folders keyed by their raw path segment, so differently-spelled
//! segments that humanize identically never collide), then a separate
//! normalization pass sorts every level and produces the final
//! [`TreeNode`] list: pages before folders, overview pages first.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::order::{ordered_name, title_case};
use crate::scanner::PageSource;

/// One node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    /// A directory of the source tree.
    Folder {
        /// Humanized display name.
        name: String,
        /// Corpus-relative raw key path (used for expand/collapse state).
        path: String,
        /// Sort key from the segment's numeric prefix.
        order: i64,
        /// Pages first, then subfolders, each sorted.
        children: Vec<TreeNode>,
    },
    /// A navigation entry for one page.
    Page {
        /// Display title.
        title: String,
        /// Page slug, the addressing key.
        slug: String,
        /// Sort key from the filename's numeric prefix.
        order: i64,
    },
}

/// Page entry accumulated during insertion.
struct PageEntry {
    title: String,
    slug: String,
    order: i64,
}

/// Folder node under construction, keyed by raw path segment.
#[derive(Default)]
struct FolderBuilder {
    folders: BTreeMap<String, FolderBuilder>,
    pages: Vec<PageEntry>,
}

impl FolderBuilder {
    fn insert(&mut self, segments: &[&str], page: PageEntry) {
        match segments {
            [] | [_] => self.pages.push(page),
            [head, rest @ ..] => self
                .folders
                .entry((*head).to_owned())
                .or_default()
                .insert(rest, page),
        }
    }

    /// Sort pages and folders per the tree invariant and produce the final
    /// ordered children list (pages before folders).
    fn normalize(self, path_prefix: &str) -> Vec<TreeNode> {
        let mut pages: Vec<PageEntry> = self.pages;
        pages.sort_by_key(|p| {
            let leaf = p
                .slug
                .trim_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_lowercase();
            let is_overview = leaf == "readme" || leaf == "index";
            (i64::from(!is_overview), p.order, p.title.to_lowercase())
        });

        let mut folders: Vec<(String, FolderBuilder)> = self.folders.into_iter().collect();
        folders.sort_by_key(|(key, _)| {
            let (order, name) = ordered_name(key);
            (order, name.to_lowercase())
        });

        let mut children: Vec<TreeNode> = pages
            .into_iter()
            .map(|p| TreeNode::Page {
                title: p.title,
                slug: p.slug,
                order: p.order,
            })
            .collect();

        for (key, folder) in folders {
            let (order, name) = ordered_name(&key);
            let path = if path_prefix.is_empty() {
                key.clone()
            } else {
                format!("{path_prefix}/{key}")
            };
            children.push(TreeNode::Folder {
                name: title_case(&name),
                order,
                children: folder.normalize(&path),
                path,
            });
        }

        children
    }
}

/// Assemble the scanned pages into the ordered navigation hierarchy.
#[must_use]
pub fn build_tree(pages: &[PageSource]) -> Vec<TreeNode> {
    let mut root = FolderBuilder::default();

    for page in pages {
        let segments: Vec<&str> = page.rel_path.split('/').collect();
        root.insert(
            &segments,
            PageEntry {
                title: page.title.clone(),
                slug: page.slug.clone(),
                order: page.order,
            },
        );
    }

    root.normalize("")
}
