//! pulldown-cmark implementations of the rendering collaborators.

use std::convert::Infallible;

use pulldown_cmark::{Options, Parser, html};

use crate::backend::{FragmentRenderer, TreeParser};
use crate::tree::Node;

/// Parser options with or without GitHub Flavored Markdown extensions.
fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Renders markdown fragments to HTML with pulldown-cmark.
///
/// # Example
///
/// ```
/// use rw_admonitions::{CmarkRenderer, FragmentRenderer};
///
/// let html = CmarkRenderer::new().render_fragment("**Heads up**").unwrap();
/// assert_eq!(html, "<p><strong>Heads up</strong></p>");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CmarkRenderer {
    gfm: bool,
}

impl CmarkRenderer {
    /// Create a renderer with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentRenderer for CmarkRenderer {
    type Error = Infallible;

    fn render_fragment(&self, markdown: &str) -> Result<String, Self::Error> {
        if markdown.trim().is_empty() {
            return Ok(String::new());
        }
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(markdown, parser_options(self.gfm)));
        Ok(out.trim().to_owned())
    }
}

/// Parses markdown documents into a [`Node`] tree with pulldown-cmark.
#[derive(Clone, Copy, Debug)]
pub struct CmarkParser {
    gfm: bool,
}

impl CmarkParser {
    /// Create a parser with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }
}

impl Default for CmarkParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParser for CmarkParser {
    type Tree = Node;
    type Error = Infallible;

    fn parse_tree(&self, markdown: &str) -> Result<Self::Tree, Self::Error> {
        Ok(Node::from_events(Parser::new_ext(
            markdown,
            parser_options(self.gfm),
        )))
    }
}
