//! Error types for loading engine configuration

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::LayoutError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid layout in configuration: {0}")]
    Layout(#[from] LayoutError),
}

impl ConfigError {
    /// Source span of a parse error, if the parser reported one
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Parse(err) => err.span(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a source span fall back to their display form.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (Self::Parse(err), Some(span)) = (self, self.span()) else {
            return self.to_string();
        };

        let message = err.message();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid configuration")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_error_with_context() {
        let source = "[engine]\ntag = = 1\n";
        let err = ConfigError::from(toml::from_str::<toml::Table>(source).unwrap_err());
        assert!(err.span().is_some());

        let report = err.format(source, "layouts.toml");
        assert!(report.contains("layouts.toml"));
    }

    #[test]
    fn test_format_without_span_falls_back() {
        let err = ConfigError::from(LayoutError::malformed("post", "bad"));
        assert_eq!(err.format("", "layouts.toml"), err.to_string());
        assert!(err.span().is_none());
    }
}
