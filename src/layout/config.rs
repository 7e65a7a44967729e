//! Configuration for layout resolution and rendering

use serde::Deserialize;

use crate::tag::{Delims, TagName, TagOptions};

use super::merge::MergeStrategy;
use super::types::{Data, LayoutDefinition};

/// Which side wins when render locals and view data share a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalsPrecedence {
    /// Locals passed to the render call override view data
    #[default]
    PreferLocals,
    /// View data overrides locals
    PreferData,
}

/// Configuration options for layout resolution
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Default placeholder delimiters
    pub delims: Delims,

    /// Placeholder tag name, `body` by default
    pub tag: TagName,

    /// Layout used when a definition does not name one
    pub default_layout: Option<String>,

    /// Strategy for combining per-layout data
    pub merge: MergeStrategy,

    /// Precedence between locals and view data in `render_view`
    pub locals: LocalsPrecedence,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            delims: Delims::default(),
            tag: TagName::default(),
            default_layout: None,
            merge: MergeStrategy::default(),
            locals: LocalsPrecedence::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default placeholder delimiters
    pub fn with_delims(mut self, delims: Delims) -> Self {
        self.delims = delims;
        self
    }

    /// Set the placeholder tag name
    pub fn with_tag(mut self, tag: TagName) -> Self {
        self.tag = tag;
        self
    }

    /// Set the default layout name
    pub fn with_default_layout(mut self, name: impl Into<String>) -> Self {
        self.default_layout = Some(name.into());
        self
    }

    /// Set the data merge strategy
    pub fn with_merge(mut self, merge: MergeStrategy) -> Self {
        self.merge = merge;
        self
    }

    /// Use a custom merge function
    pub fn with_merge_fn<F>(self, merge: F) -> Self
    where
        F: Fn(Data, &Data) -> Data + Send + Sync + 'static,
    {
        self.with_merge(MergeStrategy::custom(merge))
    }

    /// Set locals precedence for view rendering
    pub fn with_locals(mut self, locals: LocalsPrecedence) -> Self {
        self.locals = locals;
        self
    }

    /// Default layout name, ignoring an empty string
    pub fn default_layout(&self) -> Option<&str> {
        self.default_layout.as_deref().filter(|name| !name.is_empty())
    }

    /// Placeholder options for a layout, honoring its own delimiters
    pub fn tag_options(&self, layout: &LayoutDefinition) -> TagOptions {
        let delims = layout.delims.as_ref().unwrap_or(&self.delims);
        TagOptions::new(delims.clone(), self.tag.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRef;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.delims, Delims::default());
        assert_eq!(config.tag.as_str(), "body");
        assert_eq!(config.default_layout(), None);
        assert!(matches!(config.merge, MergeStrategy::Overwrite));
        assert_eq!(config.locals, LocalsPrecedence::PreferLocals);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_default_layout("default")
            .with_tag(TagName::new("content").unwrap())
            .with_merge(MergeStrategy::Deep)
            .with_locals(LocalsPrecedence::PreferData);

        assert_eq!(config.default_layout(), Some("default"));
        assert_eq!(config.tag.as_str(), "content");
        assert!(matches!(config.merge, MergeStrategy::Deep));
        assert_eq!(config.locals, LocalsPrecedence::PreferData);
    }

    #[test]
    fn test_empty_default_layout_is_none() {
        let config = LayoutConfig::new().with_default_layout("");
        assert_eq!(config.default_layout(), None);
    }

    #[test]
    fn test_tag_options_prefers_layout_delims() {
        let config = LayoutConfig::new();
        let plain = LayoutDefinition::with_parent("a", LayoutRef::Unset, "");
        assert_eq!(config.tag_options(&plain).delims, Delims::default());

        let custom = plain.with_delims(Delims::new("<%", "%>").unwrap());
        let options = config.tag_options(&custom);
        assert_eq!(options.delims.open(), "<%");
        assert_eq!(options.tag.as_str(), "body");
    }
}
