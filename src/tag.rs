//! Body placeholder replacement
//!
//! A layout marks where its inner content goes with a placeholder such as
//! `{{ body }}`. Only the first placeholder written with the configured
//! delimiters is replaced; placeholders in other delimiter styles are left
//! for a later pass.

use std::fmt;
use std::ops::Range;

use serde::Deserialize;
use thiserror::Error;

/// Default opening delimiter
pub const DEFAULT_OPEN: &str = "{{";
/// Default closing delimiter
pub const DEFAULT_CLOSE: &str = "}}";
/// Default placeholder tag name
pub const DEFAULT_TAG: &str = "body";

/// Errors produced when building delimiters or a tag name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("expected exactly two delimiters, found {0}")]
    Arity(usize),

    #[error("delimiters must be non-empty strings")]
    EmptyDelims,

    #[error("placeholder tag name must not be empty")]
    EmptyTag,
}

/// An `[open, close]` delimiter pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Delims {
    open: String,
    close: String,
}

impl Delims {
    /// Create a delimiter pair, rejecting empty delimiters
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, TagError> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() || close.is_empty() {
            return Err(TagError::EmptyDelims);
        }
        Ok(Self { open, close })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Delims {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl TryFrom<Vec<String>> for Delims {
    type Error = TagError;

    fn try_from(pair: Vec<String>) -> Result<Self, Self::Error> {
        match <[String; 2]>::try_from(pair) {
            Ok([open, close]) => Self::new(open, close),
            Err(pair) => Err(TagError::Arity(pair.len())),
        }
    }
}

/// Name between the delimiters, `body` by default; never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl Into<String>) -> Result<Self, TagError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TagError::EmptyTag);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TagName {
    fn default() -> Self {
        Self(DEFAULT_TAG.to_string())
    }
}

impl TryFrom<String> for TagName {
    type Error = TagError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options controlling which placeholder gets replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    pub delims: Delims,
    pub tag: TagName,
}

impl TagOptions {
    pub fn new(delims: Delims, tag: TagName) -> Self {
        Self { delims, tag }
    }

    /// Default tag name with custom delimiters
    pub fn with_delims(delims: Delims) -> Self {
        Self {
            delims,
            ..Self::default()
        }
    }

    /// The bare placeholder, e.g. `{{body}}`
    pub fn placeholder(&self) -> String {
        format!("{}{}{}", self.delims.open(), self.tag, self.delims.close())
    }
}

/// Replace the first body placeholder in `template` with `body`.
///
/// Whitespace inside the delimiters is tolerated, so `{{body}}` and
/// `{{ body }}` both match. A template without a matching placeholder is
/// returned unchanged.
pub fn replace_tag(body: &str, template: &str, options: &TagOptions) -> String {
    match find_tag(template, options) {
        Some(span) => {
            let mut out = String::with_capacity(template.len() - span.len() + body.len());
            out.push_str(&template[..span.start]);
            out.push_str(body);
            out.push_str(&template[span.end..]);
            out
        }
        None => {
            tracing::trace!(tag = %options.tag, "no placeholder found, template left unchanged");
            template.to_string()
        }
    }
}

/// Check whether `template` contains a placeholder for these options
pub fn has_tag(template: &str, options: &TagOptions) -> bool {
    find_tag(template, options).is_some()
}

/// Byte range of the first matching placeholder
fn find_tag(template: &str, options: &TagOptions) -> Option<Range<usize>> {
    let open = options.delims.open();
    let mut from = 0;

    while let Some(offset) = template[from..].find(open) {
        let start = from + offset;
        if let Some(end) = match_placeholder(template, start + open.len(), options) {
            return Some(start..end);
        }
        // Step one char so overlapping openers like `{{{body}}` still match
        from = start + template[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Match `ws* tag ws* close` at `pos`, returning the end offset
fn match_placeholder(template: &str, pos: usize, options: &TagOptions) -> Option<usize> {
    let rest = template[pos..].trim_start();
    let rest = rest.strip_prefix(options.tag.as_str())?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(options.delims.close())?;
    Some(template.len() - rest.len())
}
