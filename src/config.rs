//! TOML configuration for a layout engine
//!
//! A configuration file carries engine options under `[engine]` and layout
//! definitions under `[layouts.<name>]`:
//!
//! ```toml
//! [engine]
//! default_layout = "default"
//! merge = "deep"
//!
//! [layouts.default]
//! content = "<html>{{ body }}</html>"
//! title = "My site"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::layout::{Data, LayoutConfig, LayoutStore, LocalsPrecedence, MergeMode};
use crate::tag::{Delims, TagName};
use crate::Layouts;

/// A documented configuration with every engine option set to its default
pub const EXAMPLE_CONFIG: &str = r##"
[engine]
# Name of the placeholder inside the delimiters
tag = "body"
# Opening and closing placeholder delimiters
delims = ["{{", "}}"]
# Layout applied to layouts and views that do not name one
# default_layout = "default"
# How layout data is combined: overwrite | defaults | deep
merge = "overwrite"
# Who wins between render locals and view data: prefer-locals | prefer-data
locals = "prefer-locals"

[layouts.default]
content = """
<!DOCTYPE html>
<html>
<body>
{{ body }}
</body>
</html>
"""
layout = false
title = "Untitled"
"##;

/// TOML structure for deserializing a configuration file
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    engine: TomlEngine,
    #[serde(default)]
    layouts: Data,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlEngine {
    tag: Option<TagName>,
    delims: Option<Delims>,
    default_layout: Option<String>,
    merge: Option<MergeMode>,
    locals: Option<LocalsPrecedence>,
}

impl TomlEngine {
    fn into_config(self) -> LayoutConfig {
        let mut config = LayoutConfig::new();
        if let Some(tag) = self.tag {
            config = config.with_tag(tag);
        }
        if let Some(delims) = self.delims {
            config = config.with_delims(delims);
        }
        if let Some(name) = self.default_layout {
            config = config.with_default_layout(name);
        }
        if let Some(merge) = self.merge {
            config = config.with_merge(merge.into());
        }
        if let Some(locals) = self.locals {
            config = config.with_locals(locals);
        }
        config
    }
}

/// Load an engine from a TOML file
pub fn load_file(path: &Path) -> Result<Layouts, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_str(&content)
}

/// Load an engine from a TOML string
pub fn load_str(content: &str) -> Result<Layouts, ConfigError> {
    let parsed: TomlConfig = toml::from_str(content)?;

    let config = parsed.engine.into_config();
    let mut store = LayoutStore::new();
    let count = store.set_layouts(&parsed.layouts)?;
    debug!(layouts = count, "loaded layout configuration");

    Ok(Layouts::from_parts(store, config))
}
