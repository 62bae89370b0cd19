//! Rendering and parsing collaborators used by the rewriter.
//!
//! The rewriter never renders markdown itself. Title and body fragments go
//! through a [`FragmentRenderer`], and the rewritten document goes through a
//! [`TreeParser`]. [`CmarkRenderer`](crate::CmarkRenderer) and
//! [`CmarkParser`](crate::CmarkParser) implement both on top of pulldown-cmark.

use std::error::Error;

/// Renders a markdown fragment to HTML.
///
/// Implementations must return an empty string for empty input.
pub trait FragmentRenderer {
    /// Error raised when a fragment cannot be rendered.
    type Error: Error + Send + Sync + 'static;

    /// Render `markdown` to an HTML fragment.
    fn render_fragment(&self, markdown: &str) -> Result<String, Self::Error>;
}

/// Parses a full markdown document into a structural tree.
pub trait TreeParser {
    /// Tree produced by the parser.
    type Tree;
    /// Error raised when the document cannot be parsed.
    type Error: Error + Send + Sync + 'static;

    /// Parse `markdown` into a tree rooted at a document node.
    fn parse_tree(&self, markdown: &str) -> Result<Self::Tree, Self::Error>;
}

impl<R: FragmentRenderer + ?Sized> FragmentRenderer for &R {
    type Error = R::Error;

    fn render_fragment(&self, markdown: &str) -> Result<String, Self::Error> {
        (**self).render_fragment(markdown)
    }
}

impl<P: TreeParser + ?Sized> TreeParser for &P {
    type Tree = P::Tree;
    type Error = P::Error;

    fn parse_tree(&self, markdown: &str) -> Result<Self::Tree, Self::Error> {
        (**self).parse_tree(markdown)
    }
}
