//! Permissive list-literal parser.
//!
//! Accepts the list spellings generators produce when they do not emit
//! strict JSON:
//! - single- or double-quoted strings with backslash escapes
//! - numbers
//! - `True`, `False`, `None` and their JSON spellings
//! - nested lists
//! - a trailing comma before the closing bracket

use winnow::combinator::{alt, delimited, opt, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::error::{ParseError, line_column};
use crate::types::FieldValue;

/// Parse a bracketed list literal into its elements.
///
/// Surrounding whitespace is allowed; anything else after the closing
/// bracket is an error.
///
/// ```
/// use ditari::FieldValue;
/// use ditari::parser::parse_list_literal;
///
/// let items = parse_list_literal("['a', \"b\", 3, None,]").unwrap();
/// assert_eq!(items, vec![
///     FieldValue::Text("a".into()),
///     FieldValue::Text("b".into()),
///     FieldValue::Scalar("3".into()),
///     FieldValue::Empty,
/// ]);
/// ```
pub fn parse_list_literal(input: &str) -> Result<Vec<FieldValue>, ParseError> {
    let mut remaining = input;
    match delimited(ws, list, ws).parse_next(&mut remaining) {
        Ok(items) if remaining.is_empty() => Ok(items),
        Ok(_) => {
            let (line, column) = line_column(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!(
                    "unexpected character after list: '{}'",
                    remaining.chars().next().unwrap_or('?')
                ),
            })
        }
        Err(e) => {
            let (line, column) = line_column(input, remaining);
            if remaining.is_empty() {
                Err(ParseError::UnexpectedEnd { line, column })
            } else {
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!("parse error: {e}"),
                })
            }
        }
    }
}

/// Parse `[ item, item, ... ]`.
fn list(input: &mut &str) -> ModalResult<Vec<FieldValue>> {
    delimited(
        ('[', ws),
        terminated(separated(0.., item, (ws, ',', ws)), opt((ws, ','))),
        (ws, ']'),
    )
    .parse_next(input)
}

/// Parse a single list element.
fn item(input: &mut &str) -> ModalResult<FieldValue> {
    alt((
        quoted.map(FieldValue::Text),
        list.map(FieldValue::Sequence),
        constant,
        number,
    ))
    .parse_next(input)
}

/// Parse a keyword constant.
fn constant(input: &mut &str) -> ModalResult<FieldValue> {
    alt((
        alt(("None", "null")).value(FieldValue::Empty),
        alt(("True", "False", "true", "false")).map(|word: &str| FieldValue::Scalar(word.into())),
    ))
    .parse_next(input)
}

/// Parse a decimal number, kept as written.
fn number(input: &mut &str) -> ModalResult<FieldValue> {
    take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
    })
    .verify(|digits: &str| digits.parse::<f64>().is_ok())
    .map(|digits: &str| FieldValue::Scalar(digits.to_string()))
    .parse_next(input)
}

/// Parse a quoted string, resolving backslash escapes.
fn quoted(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let mut text = String::new();
    loop {
        match any.parse_next(input)? {
            c if c == quote => return Ok(text),
            '\\' => text.push(match any.parse_next(input)? {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            }),
            '\n' => return Err(ErrMode::Backtrack(ContextError::new())),
            c => text.push(c),
        }
    }
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}
