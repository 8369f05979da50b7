//! Miette diagnostic for malformed JSON input documents.

use std::fs::read_to_string;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing at the offending spot of a JSON
/// document.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("malformed JSON: {message}")]
#[diagnostic(code(lexmoji::json), help("fix the document or regenerate it"))]
pub struct JsonDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl JsonDiagnostic {
    /// Create a diagnostic from a 1-based line and column, re-reading the
    /// document for context.
    pub fn from_location(path: &Path, line: usize, column: usize, message: &str) -> Self {
        let content = read_to_string(path).unwrap_or_default();
        Self::with_content(path, &content, line, column, message)
    }

    fn with_content(path: &Path, content: &str, line: usize, column: usize, message: &str) -> Self {
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        JsonDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_points_at_line_and_column() {
        let content = "{\n  \"chat\": \"🐱\",\n  oops\n}";
        let diagnostic = JsonDiagnostic::with_content(Path::new("index.json"), content, 3, 3, "x");
        let offset = content.find("oops").unwrap();
        assert_eq!(diagnostic.span.offset(), offset);
    }

    #[test]
    fn span_is_clamped_to_content() {
        let diagnostic = JsonDiagnostic::with_content(Path::new("a.json"), "{", 9, 9, "eof");
        assert_eq!(diagnostic.span.offset(), 1);
    }
}
