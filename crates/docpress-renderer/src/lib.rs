//! Markdown rendering engines and link rewriting for docpress.
//!
//! This crate provides the [`RenderEngine`] trait with two implementations:
//! - `PulldownEngine`: delegates to pulldown-cmark with the tables extension
//!   (compiled in under the default `pulldown` feature)
//! - [`FallbackEngine`]: a built-in line-oriented state machine used when no
//!   standard engine is available
//!
//! [`select_engine`] picks the engine once at startup. Rendered HTML is then
//! post-processed by the [`LinkRewriter`], which re-targets cross-document
//! references into the site's addressing scheme while enforcing path
//! containment.
//!
//! # Example
//!
//! ```
//! use docpress_renderer::select_engine;
//!
//! let engine = select_engine();
//! let html = engine.render("# Hello\n\n**Bold** text");
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

mod engine;
mod escape;
mod fallback;
mod links;
#[cfg(feature = "pulldown")]
mod pulldown;

pub use engine::{RenderEngine, select_engine};
pub use escape::{escape_attr, escape_html};
pub use fallback::FallbackEngine;
pub use links::LinkRewriter;
#[cfg(feature = "pulldown")]
pub use pulldown::PulldownEngine;
