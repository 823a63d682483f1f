//! Errors from the list-literal parser.

use thiserror::Error;

/// Why a list literal could not be parsed.
///
/// Positions are 1-based; columns count bytes from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The literal is malformed at the given position.
    #[error("invalid list literal at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The literal stops before its closing bracket.
    #[error("list literal ends early at {line}:{column}")]
    UnexpectedEnd { line: usize, column: usize },
}

/// Line and column of the first byte of `rest` within `input`.
pub(crate) fn line_column(input: &str, rest: &str) -> (usize, usize) {
    let offset = input.len().saturating_sub(rest.len());
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(offset + 1, |newline| offset - newline);
    (line, column)
}
