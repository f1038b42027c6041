//! Documentation site compiler.
//!
//! Turns a tree of markdown sources into a single static site artifact:
//! scan (`scanner`), order (`order`), render (`render`), excerpt
//! (`excerpt`), navigation tree (`tree`), payload (`page`), and the
//! orchestrating [`SiteCompiler`] with its HTML shell (`shell`).

mod compiler;
mod excerpt;
mod order;
mod page;
mod render;
mod scanner;
mod shell;
mod tree;

pub use compiler::{BuildSummary, CompileError, SiteCompiler};
pub use excerpt::{excerpt, plain_text};
pub use order::{UNNUMBERED_ORDER, ordered_name, title_case};
pub use page::{Page, SitePayload};
pub use render::PageRenderer;
pub use scanner::{PageSource, scan_pages};
pub use shell::render_shell;
pub use tree::{TreeNode, build_tree};
