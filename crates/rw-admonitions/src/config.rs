//! Configuration for the admonition rewriter.

use crate::kind::AdmonitionKinds;

/// Configuration for [`AdmonitionRewriter`](crate::AdmonitionRewriter).
///
/// With the `serde` feature enabled the configuration can be read from a
/// config file section:
///
/// ```toml
/// kinds = ["note", "warning", "caution"]
/// skip_code_fences = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdmonitionConfig {
    /// Recognized admonition kinds.
    ///
    /// Default: [`DEFAULT_KINDS`](crate::DEFAULT_KINDS)
    pub kinds: AdmonitionKinds,
    /// Ignore `!!!` markers inside fenced code blocks.
    ///
    /// Default: `true`
    pub skip_code_fences: bool,
}

impl Default for AdmonitionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AdmonitionConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: AdmonitionKinds::default(),
            skip_code_fences: true,
        }
    }

    /// Replace the recognized kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: AdmonitionKinds) -> Self {
        self.kinds = kinds;
        self
    }

    /// Enable or disable skipping of fenced code blocks.
    #[must_use]
    pub fn with_code_fence_skipping(mut self, enabled: bool) -> Self {
        self.skip_code_fences = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdmonitionConfig::default();
        assert!(config.skip_code_fences);
        assert_eq!(config.kinds, AdmonitionKinds::default());
    }

    #[test]
    fn test_builder() {
        let kinds = AdmonitionKinds::new(["caution"]).unwrap();
        let config = AdmonitionConfig::new()
            .with_kinds(kinds.clone())
            .with_code_fence_skipping(false);
        assert!(!config.skip_code_fences);
        assert_eq!(config.kinds, kinds);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_toml() {
        let config: AdmonitionConfig =
            toml::from_str("kinds = [\"Caution\", \"note\"]\nskip_code_fences = false\n").unwrap();
        assert!(!config.skip_code_fences);
        assert_eq!(config.kinds.lookup("caution"), Some("caution"));
        assert_eq!(config.kinds.lookup("warning"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: AdmonitionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AdmonitionConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_invalid_kind() {
        let result: Result<AdmonitionConfig, _> = serde_json::from_str(r#"{"kinds": ["a b"]}"#);
        assert!(result.is_err());
    }
}
