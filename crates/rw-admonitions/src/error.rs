//! Error types for admonition rewriting.

/// Boxed error returned by a rendering or parsing collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned when a document pass fails.
///
/// The rewriter performs no recovery: a failing collaborator aborts the whole
/// document and leaves both the tree and the source text as they were received.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Rendering the title or body of an admonition failed.
    #[error("Failed to render admonition at line {line}: {source}")]
    Render {
        /// Line (1-indexed) of the `!!!` marker in the text being rewritten.
        line: usize,
        #[source]
        source: BoxError,
    },
    /// Re-parsing the rewritten document failed.
    #[error("Failed to parse rewritten document: {0}")]
    Parse(#[source] BoxError),
}

/// Error returned when an admonition vocabulary is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Kind token is empty or contains characters other than ASCII
    /// alphanumerics, `-` and `_`.
    #[error("Invalid admonition kind: {0:?}")]
    InvalidKind(String),
    /// Vocabulary contains no kinds.
    #[error("Admonition vocabulary is empty")]
    EmptyVocabulary,
}
