//! Display formatting for record values.
//!
//! Turns a raw [`FieldValue`](crate::FieldValue) into the text written into
//! the document. Lists become comma-separated text, list-looking strings are
//! parsed first, keyword fields lose their brackets, and lesson-flow fields
//! receive teaching guidance.

mod value_formatter;

pub use value_formatter::{ValueFormatter, format_value, parse_list_text};
