//! Admonition rewriting pass.
//!
//! Replaces every `!!!` admonition in a document's source with an HTML
//! container, then re-parses the rewritten source and swaps it into the
//! document tree held by the pipeline.

use std::path::PathBuf;

use crate::backend::{FragmentRenderer, TreeParser};
use crate::cmark::{CmarkParser, CmarkRenderer};
use crate::config::AdmonitionConfig;
use crate::error::RewriteError;
use crate::scanner::{AdmonitionMatch, Scanner};

/// Document handle passed between pipeline stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the document, used for log context only.
    pub path: Option<PathBuf>,
    /// Raw markdown source. `None` when the document carries no text.
    pub raw: Option<String>,
}

impl SourceFile {
    /// Create a file handle holding `raw` markdown.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            path: None,
            raw: Some(raw.into()),
        }
    }

    /// Set the document path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A pipeline stage that updates a document tree and its source in place.
///
/// Later stages keep using the same `tree` and `file`, so any rewrite is
/// visible to them without re-fetching.
pub trait Transform<T> {
    /// Run the stage on one document.
    fn transform(&mut self, tree: &mut T, file: &mut SourceFile) -> Result<(), RewriteError>;
}

/// Rewrites MkDocs-style admonitions into HTML containers.
///
/// Each admonition
///
/// ```markdown
/// !!! note "Title"
///     Body
/// ```
///
/// becomes
///
/// ```html
/// <div class="admonition admonition-note">
/// <div class="admonition-title"><p>Title</p></div>
/// <p>Body</p>
/// </div>
/// ```
///
/// # Example
///
/// ```
/// use rw_admonitions::{AdmonitionRewriter, Node, SourceFile};
///
/// let mut file = SourceFile::new("!!! tip \"Hint\"\n    Read the docs.\n");
/// let mut tree = Node::document();
///
/// let mut rewriter = AdmonitionRewriter::new();
/// rewriter.rewrite(&mut tree, &mut file).unwrap();
///
/// let raw = file.raw.unwrap();
/// assert!(raw.contains(r#"<div class="admonition admonition-tip">"#));
/// assert!(!raw.contains("!!!"));
/// assert_eq!(tree.children.len(), 1);
/// ```
pub struct AdmonitionRewriter<R = CmarkRenderer, P = CmarkParser> {
    config: AdmonitionConfig,
    renderer: R,
    parser: P,
    warnings: Vec<String>,
}

impl AdmonitionRewriter {
    /// Create a rewriter with default configuration and pulldown-cmark collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AdmonitionConfig::default())
    }

    /// Create a rewriter with custom configuration and pulldown-cmark collaborators.
    #[must_use]
    pub fn with_config(config: AdmonitionConfig) -> Self {
        Self::from_parts(config, CmarkRenderer::new(), CmarkParser::new())
    }
}

impl Default for AdmonitionRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> AdmonitionRewriter<R, P> {
    /// Create a rewriter with custom collaborators.
    #[must_use]
    pub fn from_parts(config: AdmonitionConfig, renderer: R, parser: P) -> Self {
        Self {
            config,
            renderer,
            parser,
            warnings: Vec::new(),
        }
    }

    /// Get the active configuration.
    #[must_use]
    pub fn config(&self) -> &AdmonitionConfig {
        &self.config
    }

    /// Get warnings generated by the most recent pass.
    ///
    /// Each pass clears the warnings of the previous one, so a rewriter reused
    /// across documents only reports the current document.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl<R: FragmentRenderer, P> AdmonitionRewriter<R, P> {
    /// Rewrite all admonitions in `input`.
    ///
    /// Returns `None` if the text contains no admonition.
    pub fn rewrite_text(&mut self, input: &str) -> Result<Option<String>, RewriteError> {
        self.warnings.clear();
        let scanner = Scanner::new(&self.config.kinds, self.config.skip_code_fences);
        let mut text = input.to_owned();
        let mut cursor = 0;
        // Line of `input` that the text at `cursor` came from.
        let mut cursor_line = 1;
        let mut count = 0usize;

        while let Some(found) = scanner.find(&text, cursor) {
            let line = cursor_line + count_newlines(&text[cursor..found.span.start]);
            if found.title_unterminated {
                tracing::warn!(line, kind = %found.kind, "Unterminated admonition title");
                self.warnings.push(format!(
                    "line {line}: unterminated admonition title, using first line"
                ));
            }
            let mut replacement = self.render_container(&found, line)?;

            let after = &text[found.span.end..];
            if !after.is_empty() && !starts_with_blank_line(after) {
                // End the HTML block before the following markdown
                replacement.push('\n');
            }

            tracing::debug!(kind = %found.kind, line, "Rewrote admonition");

            cursor_line = line + count_newlines(&text[found.span.clone()]);
            cursor = found.span.start + replacement.len();
            text.replace_range(found.span, &replacement);
            count += 1;
        }

        if count == 0 {
            return Ok(None);
        }
        tracing::debug!(count, "Admonition rewriting completed");
        Ok(Some(text))
    }

    fn render_container(
        &self,
        found: &AdmonitionMatch,
        line: usize,
    ) -> Result<String, RewriteError> {
        let title = found.dedented_title();
        let title_html = if title.is_empty() {
            String::new()
        } else {
            self.render(&title, line)?
        };
        let body_html = self.render(&found.dedented_body(), line)?;

        Ok(build_container(
            &found.kind,
            &title_html,
            &body_html,
            &found.lead,
        ))
    }

    fn render(&self, markdown: &str, line: usize) -> Result<String, RewriteError> {
        self.renderer
            .render_fragment(markdown)
            .map(|html| html.trim().to_owned())
            .map_err(|e| RewriteError::Render {
                line,
                source: Box::new(e),
            })
    }
}

impl<R: FragmentRenderer, P: TreeParser> AdmonitionRewriter<R, P> {
    /// Rewrite the admonitions of `file` and replace `tree` with the re-parsed result.
    ///
    /// Does nothing if `file` has no text or the text contains no admonition.
    /// On error neither `tree` nor `file` is modified.
    pub fn rewrite(
        &mut self,
        tree: &mut P::Tree,
        file: &mut SourceFile,
    ) -> Result<(), RewriteError> {
        let Some(raw) = file.raw.as_deref() else {
            self.warnings.clear();
            return Ok(());
        };
        let result = self.rewrite_text(raw);
        if let Some(path) = &file.path {
            for warning in &mut self.warnings {
                *warning = format!("{}: {warning}", path.display());
            }
        }
        let Some(rewritten) = result? else {
            return Ok(());
        };

        let fresh = self
            .parser
            .parse_tree(&rewritten)
            .map_err(|e| RewriteError::Parse(Box::new(e)))?;

        tracing::debug!(path = ?file.path, "Replaced document tree");
        *tree = fresh;
        file.raw = Some(rewritten);
        Ok(())
    }
}

impl<R: FragmentRenderer, P: TreeParser> Transform<P::Tree> for AdmonitionRewriter<R, P> {
    fn transform(
        &mut self,
        tree: &mut P::Tree,
        file: &mut SourceFile,
    ) -> Result<(), RewriteError> {
        self.rewrite(tree, file)
    }
}

/// Build the container markup for one admonition.
///
/// The result starts at a line boundary and ends with a newline, so it forms a
/// single raw HTML block for the markdown parser. Every line is prefixed with
/// `lead`, the marker's indentation, so a block inside a list item stays in it.
fn build_container(kind: &str, title_html: &str, body_html: &str, lead: &str) -> String {
    let mut markup = format!("<div class=\"admonition admonition-{kind}\">\n");
    if !title_html.is_empty() {
        markup.push_str("<div class=\"admonition-title\">");
        markup.push_str(&join_without_blank_lines(title_html));
        markup.push_str("</div>\n");
    }
    if !body_html.is_empty() {
        markup.push_str(&join_without_blank_lines(body_html));
        markup.push('\n');
    }
    markup.push_str("</div>\n");

    if lead.is_empty() {
        return markup;
    }
    let mut out = String::with_capacity(markup.len() + lead.len() * 8);
    for line in markup.lines() {
        out.push_str(lead);
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Fold blank lines into the preceding line as `&#10;`.
///
/// A blank line ends a raw HTML block, which would leak the rest of a rendered
/// `<pre>` back into markdown parsing. The character reference keeps the
/// newline in the rendered output.
fn join_without_blank_lines(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    for (idx, line) in html.lines().enumerate() {
        if idx > 0 {
            out.push_str(if line.trim().is_empty() { "&#10;" } else { "\n" });
        }
        out.push_str(line);
    }
    out
}

fn starts_with_blank_line(text: &str) -> bool {
    text.lines().next().is_some_and(|line| line.trim().is_empty())
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
