use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::FieldValue;

/// Errors raised while turning generated text into a [`Record`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// The text holds no `{ ... }` span at all.
    #[error("response contains no JSON object: {response}")]
    NoJsonObject { response: String },

    /// A `{ ... }` span was found but is not valid JSON.
    #[error("could not decode JSON from response: {source}")]
    InvalidJson {
        response: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is valid but is not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// A flat, ordered key/value record as produced by a content generator.
///
/// Keys are kept verbatim (accents, spaces and case included); matching
/// against placeholders happens on normalized keys later. Insertion order is
/// preserved and inserting an existing key replaces its value in place.
///
/// # Example
///
/// ```
/// use ditari::{FieldValue, Record};
///
/// let mut record = Record::new();
/// record.insert("Tema", "Trekëndëshi");
/// record.insert("Klasa", 10);
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("Tema"), Some(&FieldValue::Text("Trekëndëshi".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object, keeping the object's key order.
    pub fn from_json_object(object: Map<String, JsonValue>) -> Self {
        Self {
            entries: object
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from(value)))
                .collect(),
        }
    }

    /// Build a record from any JSON value, which must be an object.
    pub fn from_json(value: JsonValue) -> Result<Self, RecordError> {
        match value {
            JsonValue::Object(object) => Ok(Self::from_json_object(object)),
            other => Err(RecordError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse generated text into a record.
    ///
    /// The whole (trimmed) text is tried as JSON first. Generators often wrap
    /// the object in prose or code fences, so on failure the span from the
    /// first `{` to the last `}` is parsed instead.
    ///
    /// ```
    /// use ditari::Record;
    ///
    /// let record = Record::from_response_text("Ja plani:\n```json\n{\"tema\": \"Pitagora\"}\n```")
    ///     .unwrap();
    /// assert_eq!(record.get("tema").unwrap().to_string(), "Pitagora");
    /// ```
    pub fn from_response_text(text: &str) -> Result<Self, RecordError> {
        let text = text.trim();
        if let Ok(value) = serde_json::from_str::<JsonValue>(text) {
            return Self::from_json(value);
        }

        let object_span = text
            .find('{')
            .zip(text.rfind('}'))
            .filter(|(open, close)| open < close)
            .and_then(|(open, close)| text.get(open..=close));
        let Some(candidate) = object_span else {
            return Err(RecordError::NoJsonObject {
                response: text.to_string(),
            });
        };

        let value = serde_json::from_str::<JsonValue>(candidate).map_err(|source| {
            RecordError::InvalidJson {
                response: text.to_string(),
                source,
            }
        })?;
        Self::from_json(value)
    }

    /// Insert or replace a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a value by its exact raw key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Whether the exact raw key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, JsonValue>::deserialize(deserializer)?;
        Ok(Record::from_json_object(object))
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
