//! Error types for layout registration and resolution

use thiserror::Error;

/// Errors that can occur while registering or resolving layouts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A layout chain revisited a layout already seen in this resolution
    #[error("layout cycle detected: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// A layout name that is not registered
    #[error("{}", unresolved_message(name, referenced_by.as_deref()))]
    Unresolved {
        name: String,
        referenced_by: Option<String>,
    },

    /// A definition that cannot be normalized into a layout
    #[error("malformed layout definition '{name}': {reason}")]
    Malformed { name: String, reason: String },
}

fn unresolved_message(name: &str, referenced_by: Option<&str>) -> String {
    match referenced_by {
        Some(parent_of) => format!("layout '{name}' (referenced by '{parent_of}') is not defined"),
        None => format!("layout '{name}' is not defined"),
    }
}

impl LayoutError {
    /// Create a cycle error from the visited chain, ending with the repeated name
    pub fn cycle(chain: Vec<String>) -> Self {
        Self::Cycle { chain }
    }

    /// Create an unresolved layout error
    pub fn unresolved(name: impl Into<String>, referenced_by: Option<&str>) -> Self {
        Self::Unresolved {
            name: name.into(),
            referenced_by: referenced_by.map(str::to_string),
        }
    }

    /// Create a malformed definition error
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Name of the layout the error is about
    pub fn layout_name(&self) -> &str {
        match self {
            Self::Cycle { chain } => chain.last().map(String::as_str).unwrap_or_default(),
            Self::Unresolved { name, .. } => name,
            Self::Malformed { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = LayoutError::cycle(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(err.to_string(), "layout cycle detected: a -> b -> a");
        assert_eq!(err.layout_name(), "a");
    }

    #[test]
    fn test_unresolved_display() {
        let err = LayoutError::unresolved("base", Some("post"));
        assert_eq!(
            err.to_string(),
            "layout 'base' (referenced by 'post') is not defined"
        );

        let err = LayoutError::unresolved("base", None);
        assert_eq!(err.to_string(), "layout 'base' is not defined");
    }

    #[test]
    fn test_malformed_display() {
        let err = LayoutError::malformed("post", "`content` must be a string");
        assert!(err.to_string().contains("post"));
        assert!(err.to_string().contains("content"));
    }
}
