// ABOUTME: Error types for template loading, parsing and rendering
// ABOUTME: Defines the typed failures a render call can surface to its caller

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Line and column (both 1-based) of a tag inside a template body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Compute the position of a byte offset inside `source`
    pub fn locate(source: &str, offset: usize) -> Self {
        let before = &source[..offset.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Template parse error at {position}: {message}")]
    Parse { message: String, position: Position },

    #[error("Template type error: '{path}' resolved to a {found}, which cannot be rendered as text")]
    Type { path: String, found: &'static str },

    #[error("Invalid render context: {0}")]
    InvalidContext(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TemplateError {
    pub(crate) fn parse(message: impl Into<String>, source: &str, offset: usize) -> Self {
        TemplateError::Parse {
            message: message.into(),
            position: Position::locate(source, offset),
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_line() {
        assert_eq!(Position::locate("abc {{x}}", 4), Position { line: 1, column: 5 });
    }

    #[test]
    fn test_position_after_newlines() {
        let source = "one\ntwo\n  {{#if x}}";
        let offset = source.find("{{").unwrap();
        assert_eq!(Position::locate(source, offset), Position { line: 3, column: 3 });
    }

    #[test]
    fn test_parse_error_message_names_position() {
        let err = TemplateError::parse("unclosed {{#if x}}", "a\n{{#if x}}", 2);
        assert_eq!(
            err.to_string(),
            "Template parse error at line 2, column 1: unclosed {{#if x}}"
        );
    }
}
