//! Text scanners built on winnow.
//!
//! Two small grammars live here: the `{{ key }}` placeholder scanner used on
//! paragraph text, and the permissive list-literal parser the value
//! formatter falls back to when a list-looking string is not strict JSON.

pub mod error;
mod list_literal;
mod placeholder;

pub use error::ParseError;
pub use list_literal::parse_list_literal;
pub use placeholder::{PlaceholderSpan, find_placeholders, has_placeholder};
