//! Diagnostics and error reporting for Cub.
//!
//! Renders errors as a header, a `-->` location line, and the offending source line with a caret.

use std::fmt::Write as _;

use miette::Diagnostic;
use thiserror::Error;

use crate::position::Position;
use crate::reader::ReaderError;

/// An error found while scanning or reading source, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cub::syntax))]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
    pub kind: ErrorKind,
}

impl SyntaxError {
    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
            kind: ErrorKind::Syntax,
        }
    }

    /// Valid-looking input the compiler does not handle yet (floats, octal, unicode escapes).
    pub fn unsupported(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
            kind: ErrorKind::Unsupported,
        }
    }

    /// Convert a reader failure, using `eof` as the location when the reader has none.
    pub fn from_reader(err: &ReaderError, eof: Position) -> Self {
        Self::syntax(err.to_string(), err.position().unwrap_or(eof))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Unsupported,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Render an error with source context.
pub fn format_error(file_name: &str, source: &str, error: &SyntaxError) -> String {
    let Position { line, column } = error.position;
    let line_text = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
    let width = line.to_string().len();

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}: {}", error.kind, error.message);
    let _ = writeln!(out, "  --> {file_name}:{line}:{column}");
    let _ = writeln!(out, "  {:>width$} |", "");
    let _ = writeln!(out, "  {line:>width$} | {line_text}");
    let _ = writeln!(out, "  {:>width$} | {}^", "", " ".repeat(column.saturating_sub(1)));
    out
}

/// Position just past the last character of `source`.
pub fn end_of(source: &str) -> Position {
    let line = source.matches('\n').count() + 1;
    let last_line = source.rsplit('\n').next().unwrap_or("");
    Position::new(line, last_line.chars().count() + 1)
}
