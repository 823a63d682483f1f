use std::fmt::{Display, Formatter, Result as FmtResult};

use serde_json::Value as JsonValue;

/// A raw record value.
///
/// Generated records carry the same field as a list, as a string that spells
/// out a list, or as a plain scalar. The shape is fixed once, when the value
/// enters the record; the formatter decides how to display each shape.
///
/// # Example
///
/// ```
/// use ditari::FieldValue;
///
/// let list: FieldValue = vec!["a", "b"].into();
/// assert_eq!(list.to_string(), "a, b");
///
/// let number: FieldValue = 10.into();
/// assert_eq!(number.to_string(), "10");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value (JSON `null`).
    Empty,

    /// A non-string value in display form: a number, a boolean, or a nested
    /// object serialized as compact JSON.
    Scalar(String),

    /// An ordered list of values.
    Sequence(Vec<FieldValue>),

    /// Free text, possibly spelling out a list literal.
    Text(String),
}

/// Separator used when a list is displayed as text.
pub const LIST_SEPARATOR: &str = ", ";

impl FieldValue {
    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the elements of this value, if it is a sequence.
    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value would display as nothing.
    ///
    /// Mirrors the truthiness a generated record is checked with: `null`,
    /// empty text and empty lists are blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Sequence(items) => items.is_empty(),
            FieldValue::Scalar(_) => false,
        }
    }
}

/// Joins `items` with [`LIST_SEPARATOR`].
///
/// Nested sequences keep their brackets so the nesting stays visible.
pub fn join_items(items: &[FieldValue]) -> String {
    items
        .iter()
        .map(|item| match item {
            FieldValue::Sequence(inner) => format!("[{}]", join_items(inner)),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Scalar(s) | FieldValue::Text(s) => f.write_str(s),
            FieldValue::Sequence(items) => f.write_str(&join_items(items)),
        }
    }
}

impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Empty,
            JsonValue::Bool(b) => FieldValue::Scalar(b.to_string()),
            JsonValue::Number(n) => FieldValue::Scalar(n.to_string()),
            JsonValue::String(s) => FieldValue::Text(s),
            JsonValue::Array(items) => {
                FieldValue::Sequence(items.into_iter().map(FieldValue::from).collect())
            }
            object @ JsonValue::Object(_) => FieldValue::Scalar(object.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Scalar(n.to_string())
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Scalar(n.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Scalar(n.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Scalar(b.to_string())
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}
