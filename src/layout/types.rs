//! Core layout types

use toml::Value;

use crate::tag::Delims;

use super::error::LayoutError;

/// Front-matter-like data attached to a layout
pub type Data = toml::Table;

/// Names that always mean "no parent layout", even when a default is configured
pub const TERMINAL_NAMES: [&str; 3] = ["false", "null", "nil"];

/// Raw `layout` reference of a definition, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LayoutRef {
    /// Field absent
    #[default]
    Unset,
    /// Explicitly null
    Null,
    /// `true` asks for the default layout, `false` opts out
    Flag(bool),
    /// A parent layout name (or one of the terminal names)
    Name(String),
}

impl LayoutRef {
    /// Read a reference from a TOML value; only strings and booleans qualify
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Name(name.clone())),
            Value::Boolean(flag) => Some(Self::Flag(*flag)),
            _ => None,
        }
    }

    /// True when the reference names a layout directly rather than
    /// deferring to the default
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Name(name) if !name.is_empty())
    }
}

impl From<&str> for LayoutRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for LayoutRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<bool> for LayoutRef {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl<T: Into<LayoutRef>> From<Option<T>> for LayoutRef {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A registered layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDefinition {
    pub name: String,
    /// Parent layout reference
    pub layout: LayoutRef,
    pub data: Data,
    /// Template with a body placeholder
    pub content: String,
    /// Delimiters for this layout's placeholder, when not the engine default
    pub delims: Option<Delims>,
}

impl LayoutDefinition {
    /// `(name, parent, content)` form
    pub fn with_parent(
        name: impl Into<String>,
        parent: impl Into<LayoutRef>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            layout: parent.into(),
            data: Data::new(),
            content: content.into(),
            delims: None,
        }
    }

    /// `(name, data, content)` form
    ///
    /// A `layout` key inside `data` is taken as the parent reference when it
    /// is a string or boolean.
    pub fn with_data(name: impl Into<String>, mut data: Data, content: impl Into<String>) -> Self {
        let layout = match data.get("layout").and_then(LayoutRef::from_value) {
            Some(layout) => {
                data.remove("layout");
                layout
            }
            None => LayoutRef::Unset,
        };

        Self {
            name: name.into(),
            layout,
            data,
            content: content.into(),
            delims: None,
        }
    }

    /// `(name, definition)` form, where the table carries `content`,
    /// `layout`, `delims` and `data` keys.
    ///
    /// Keys other than those four become data. Entries of an explicit `data`
    /// table win over loose keys with the same name.
    pub fn from_table(name: impl Into<String>, table: &Data) -> Result<Self, LayoutError> {
        let name = name.into();
        let mut def = Self::with_parent(name.clone(), LayoutRef::Unset, String::new());
        let mut explicit_data = None;

        for (key, value) in table {
            match key.as_str() {
                "content" => {
                    def.content = value
                        .as_str()
                        .ok_or_else(|| LayoutError::malformed(&name, "`content` must be a string"))?
                        .to_string();
                }
                "layout" => {
                    def.layout = LayoutRef::from_value(value).ok_or_else(|| {
                        LayoutError::malformed(&name, "`layout` must be a string or boolean")
                    })?;
                }
                "delims" => def.delims = Some(parse_delims(&name, value)?),
                "data" => {
                    let data = value
                        .as_table()
                        .ok_or_else(|| LayoutError::malformed(&name, "`data` must be a table"))?;
                    explicit_data = Some(data);
                }
                _ => {
                    def.data.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(data) = explicit_data {
            for (key, value) in data {
                def.data.insert(key.clone(), value.clone());
            }
        }

        Ok(def)
    }

    /// Set per-layout delimiters
    pub fn with_delims(mut self, delims: Delims) -> Self {
        self.delims = Some(delims);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::malformed(
                &self.name,
                "layout name must not be empty",
            ));
        }
        Ok(())
    }
}

fn parse_delims(name: &str, value: &Value) -> Result<Delims, LayoutError> {
    let items = value
        .as_array()
        .ok_or_else(|| LayoutError::malformed(name, "`delims` must be an array of two strings"))?;
    let pair = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| LayoutError::malformed(name, "`delims` must be an array of two strings"))?;

    Delims::try_from(pair).map_err(|e| LayoutError::malformed(name, format!("`delims`: {e}")))
}
