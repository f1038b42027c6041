//! Render engine selection.
//!
//! The compiler renders each document with exactly one engine, chosen once
//! at startup. The standard engine (pulldown-cmark) is compiled in under the
//! `pulldown` cargo feature; when the feature is disabled the built-in
//! [`FallbackEngine`](crate::FallbackEngine) takes over.

/// A markdown-to-HTML rendering engine.
///
/// Implementations are stateless: one engine instance renders any number of
/// documents, in any order, from any thread.
pub trait RenderEngine: Send + Sync {
    /// Render one document's markdown to structural HTML.
    ///
    /// The output has not been link-rewritten yet; callers pass it through
    /// [`LinkRewriter`](crate::LinkRewriter) before use.
    fn render(&self, markdown: &str) -> String;

    /// Engine name for logging.
    fn name(&self) -> &'static str;
}

/// Select the best available render engine.
///
/// Returns the pulldown-cmark engine when compiled in, otherwise the
/// built-in fallback state machine.
#[must_use]
pub fn select_engine() -> Box<dyn RenderEngine> {
    #[cfg(feature = "pulldown")]
    {
        Box::new(crate::PulldownEngine)
    }
    #[cfg(not(feature = "pulldown"))]
    {
        Box::new(crate::FallbackEngine)
    }
}
