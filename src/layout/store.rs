//! Layout store for registering and looking up layout definitions

use std::collections::HashMap;

use tracing::debug;

use super::error::LayoutError;
use super::types::{Data, LayoutDefinition};

/// Mapping from layout name to its definition
///
/// Registration only checks the shape of a definition. Parent references
/// are checked at resolution time, since layouts may be registered in any
/// order.
#[derive(Debug, Default, Clone)]
pub struct LayoutStore {
    layouts: HashMap<String, LayoutDefinition>,
}

impl LayoutStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a layout, returning the definition it replaced
    pub fn set_layout(
        &mut self,
        def: LayoutDefinition,
    ) -> Result<Option<LayoutDefinition>, LayoutError> {
        def.validate()?;
        debug!(layout = %def.name, parent = ?def.layout, "registering layout");
        Ok(self.layouts.insert(def.name.clone(), def))
    }

    /// Register every entry of a `name -> definition table` mapping
    ///
    /// All entries are normalized before any is inserted, so a malformed
    /// entry leaves the store untouched. Returns the number registered.
    pub fn set_layouts(&mut self, layouts: &Data) -> Result<usize, LayoutError> {
        let defs = layouts
            .iter()
            .map(|(name, value)| {
                let table = value.as_table().ok_or_else(|| {
                    LayoutError::malformed(name, "layout definition must be a table")
                })?;
                let def = LayoutDefinition::from_table(name, table)?;
                def.validate()?;
                Ok(def)
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        let count = defs.len();
        for def in defs {
            self.set_layout(def)?;
        }
        Ok(count)
    }

    /// Get a layout by name
    pub fn get_layout(&self, name: &str) -> Option<&LayoutDefinition> {
        self.layouts.get(name)
    }

    /// Check if a layout exists
    pub fn contains(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Remove a layout, returning its definition
    pub fn remove(&mut self, name: &str) -> Option<LayoutDefinition> {
        self.layouts.remove(name)
    }

    /// Get all layout names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(|s| s.as_str())
    }

    /// Iterate over all definitions
    pub fn iter(&self) -> impl Iterator<Item = &LayoutDefinition> {
        self.layouts.values()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRef;

    fn table(src: &str) -> Data {
        src.parse().expect("valid TOML table")
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = LayoutStore::new();
        store
            .set_layout(LayoutDefinition::with_parent("base", false, "<html>{{ body }}</html>"))
            .expect("Should register");

        assert!(store.contains("base"));
        assert_eq!(store.len(), 1);
        let def = store.get_layout("base").unwrap();
        assert_eq!(def.layout, LayoutRef::Flag(false));
        assert!(store.get_layout("missing").is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let mut store = LayoutStore::new();
        store
            .set_layout(LayoutDefinition::with_parent("base", LayoutRef::Unset, "one"))
            .unwrap();
        let replaced = store
            .set_layout(LayoutDefinition::with_parent("base", LayoutRef::Unset, "two"))
            .unwrap();

        assert_eq!(replaced.map(|d| d.content), Some("one".to_string()));
        assert_eq!(store.get_layout("base").unwrap().content, "two");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_accepts_dangling_parent() {
        let mut store = LayoutStore::new();
        store
            .set_layout(LayoutDefinition::with_parent("post", "not-yet-defined", ""))
            .expect("parents are checked at resolution");
    }

    #[test]
    fn test_store_rejects_empty_name() {
        let mut store = LayoutStore::new();
        let err = store
            .set_layout(LayoutDefinition::with_parent("", LayoutRef::Unset, ""))
            .unwrap_err();
        assert!(matches!(err, LayoutError::Malformed { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_layouts_bulk() {
        let mut store = LayoutStore::new();
        let count = store
            .set_layouts(&table(
                r#"
[base]
content = "<html>{{ body }}</html>"

[post]
layout = "base"
content = "<article>{{ body }}</article>"
title = "Post"
"#,
            ))
            .unwrap();

        assert_eq!(count, 2);
        let post = store.get_layout("post").unwrap();
        assert_eq!(post.layout, LayoutRef::from("base"));
        assert_eq!(post.data["title"].as_str(), Some("Post"));

        let mut names: Vec<_> = store.names().collect();
        names.sort();
        assert_eq!(names, vec!["base", "post"]);
    }

    #[test]
    fn test_set_layouts_is_all_or_nothing() {
        let mut store = LayoutStore::new();
        let err = store
            .set_layouts(&table(
                r#"
good = { content = "ok" }
bad = "not a table"
"#,
            ))
            .unwrap_err();

        assert_eq!(err.layout_name(), "bad");
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store = LayoutStore::new();
        store
            .set_layout(LayoutDefinition::with_parent("a", LayoutRef::Unset, ""))
            .unwrap();
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
    }
}
