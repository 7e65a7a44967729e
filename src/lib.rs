//! Layouts - nested layout composition for static-site and template toolkits
//!
//! Register named layouts, each a template with a `{{ body }}` placeholder,
//! some data and an optional parent layout. Rendering content through a
//! layout wraps it in that layout and every ancestor, outermost last, and
//! merges the data of every layout along the way.
//!
//! # Example
//!
//! ```rust
//! use layouts::{LayoutDefinition, Layouts};
//!
//! let mut engine = Layouts::new();
//! engine
//!     .set_layout(LayoutDefinition::with_parent("base", false, "<html>{{ body }}</html>"))
//!     .unwrap();
//! engine
//!     .set_layout(LayoutDefinition::with_parent("post", "base", "<article>{{ body }}</article>"))
//!     .unwrap();
//!
//! let out = engine.render("Hello", Some("post")).unwrap();
//! assert_eq!(out.content, "<html><article>Hello</article></html>");
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod tag;

use std::path::Path;

pub use error::ConfigError;
pub use layout::{
    assert_layout, Data, LayoutConfig, LayoutDefinition, LayoutError, LayoutRef, LayoutStore,
    LocalsPrecedence, MergeStrategy, Stack,
};
pub use render::{Rendered, View};
pub use tag::{replace_tag, Delims, TagError, TagName, TagOptions};

/// A layout engine: one layout store plus the configuration used to resolve it
///
/// Each instance owns its layouts, so independent engines can coexist in
/// one process.
#[derive(Debug, Clone, Default)]
pub struct Layouts {
    store: LayoutStore,
    config: LayoutConfig,
}

impl Layouts {
    /// Create an empty engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with custom configuration
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            store: LayoutStore::new(),
            config,
        }
    }

    /// Create an engine from an existing store and configuration
    pub fn from_parts(store: LayoutStore, config: LayoutConfig) -> Self {
        Self { store, config }
    }

    /// Load an engine from a TOML configuration string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        config::load_str(content)
    }

    /// Load an engine from a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        config::load_file(path)
    }

    /// Get the configuration used for resolution
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Get a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut LayoutConfig {
        &mut self.config
    }

    /// Get the layout store
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Register or replace a layout
    pub fn set_layout(
        &mut self,
        def: LayoutDefinition,
    ) -> Result<Option<LayoutDefinition>, LayoutError> {
        self.store.set_layout(def)
    }

    /// Register every layout of a `name -> definition table` mapping
    pub fn set_layouts(&mut self, layouts: &Data) -> Result<usize, LayoutError> {
        self.store.set_layouts(layouts)
    }

    /// Get a layout by name
    pub fn get_layout(&self, name: &str) -> Option<&LayoutDefinition> {
        self.store.get_layout(name)
    }

    /// Resolve the layout stack starting at `name`
    pub fn stack(&self, name: &str) -> Result<Stack, LayoutError> {
        layout::stack(&self.store, &self.config, name)
    }

    /// Wrap `content` in the layout stack starting at `layout`
    pub fn render(&self, content: &str, layout: Option<&str>) -> Result<Rendered, LayoutError> {
        render::render(&self.store, &self.config, content, layout)
    }

    /// Callback form of [`Layouts::render`]
    pub fn render_with<F>(&self, content: &str, layout: Option<&str>, callback: F)
    where
        F: FnOnce(Result<Rendered, LayoutError>),
    {
        render::render_with(&self.store, &self.config, content, layout, callback)
    }

    /// `async` form of [`Layouts::render`]
    pub async fn render_async(
        &self,
        content: &str,
        layout: Option<&str>,
    ) -> Result<Rendered, LayoutError> {
        render::render_async(&self.store, &self.config, content, layout).await
    }

    /// Render a view through its own layout reference, layering `locals`
    pub fn render_view(&self, view: &View, locals: Option<&Data>) -> Result<Rendered, LayoutError> {
        render::render_view(&self.store, &self.config, view, locals)
    }
}
