//! Recognized admonition kinds.

use crate::error::ConfigError;

/// Admonition kinds recognized out of the box, in MkDocs order.
pub const DEFAULT_KINDS: [&str; 12] = [
    "note", "info", "tip", "success", "question", "failure", "danger", "bug", "example", "quote",
    "warning", "abstract",
];

/// Ordered, lowercase vocabulary of admonition kinds.
///
/// Lookups are case-insensitive; the canonical lowercase token is what ends
/// up in the emitted `admonition-<kind>` class.
///
/// # Example
///
/// ```
/// use rw_admonitions::AdmonitionKinds;
///
/// let kinds = AdmonitionKinds::default();
/// assert_eq!(kinds.lookup("WARNING"), Some("warning"));
/// assert_eq!(kinds.lookup("caution"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<String>"))]
pub struct AdmonitionKinds {
    kinds: Vec<String>,
}

impl AdmonitionKinds {
    /// Build a vocabulary from custom kind tokens.
    ///
    /// Tokens are lowercased and deduplicated, keeping first occurrence order.
    pub fn new<I, S>(kinds: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for kind in kinds {
            let kind = kind.as_ref().trim();
            if !is_valid_kind(kind) {
                return Err(ConfigError::InvalidKind(kind.to_owned()));
            }
            let kind = kind.to_ascii_lowercase();
            if !normalized.contains(&kind) {
                normalized.push(kind);
            }
        }
        if normalized.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        Ok(Self { kinds: normalized })
    }

    /// Return the canonical lowercase token for `token`, if recognized.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.kinds
            .iter()
            .find(|kind| kind.eq_ignore_ascii_case(token))
            .map(String::as_str)
    }

    /// Iterate over the kinds in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }

    /// Number of recognized kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is recognized. Never true for a validated vocabulary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for AdmonitionKinds {
    fn default() -> Self {
        Self {
            kinds: DEFAULT_KINDS.iter().map(|&kind| kind.to_owned()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for AdmonitionKinds {
    type Error = ConfigError;

    fn try_from(kinds: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(kinds)
    }
}

fn is_valid_kind(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let kinds = AdmonitionKinds::default();
        assert_eq!(kinds.len(), 12);
        assert_eq!(kinds.iter().next(), Some("note"));
        assert_eq!(kinds.iter().last(), Some("abstract"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let kinds = AdmonitionKinds::default();
        assert_eq!(kinds.lookup("note"), Some("note"));
        assert_eq!(kinds.lookup("Warning"), Some("warning"));
        assert_eq!(kinds.lookup("DANGER"), Some("danger"));
        assert_eq!(kinds.lookup("notes"), None);
        assert_eq!(kinds.lookup(""), None);
    }

    #[test]
    fn test_custom_kinds_normalized() {
        let kinds = AdmonitionKinds::new(["Caution", "caution", "see-also"]).unwrap();
        assert_eq!(kinds.iter().collect::<Vec<_>>(), vec!["caution", "see-also"]);
        assert_eq!(kinds.lookup("CAUTION"), Some("caution"));
        assert_eq!(kinds.lookup("note"), None);
    }

    #[test]
    fn test_invalid_kind_rejected() {
        assert_eq!(
            AdmonitionKinds::new(["ok", "not ok"]),
            Err(ConfigError::InvalidKind("not ok".to_owned()))
        );
        assert_eq!(
            AdmonitionKinds::new(["<script>"]),
            Err(ConfigError::InvalidKind("<script>".to_owned()))
        );
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            AdmonitionKinds::new(empty),
            Err(ConfigError::EmptyVocabulary)
        );
    }
}
