use std::collections::HashMap;
use std::mem;

use super::{NormalizedKey, Record, normalize_key};
use crate::format::ValueFormatter;

/// Display-ready record keyed by normalized keys.
///
/// Entries keep insertion order, which the partial-match tier of the
/// resolver relies on. When two raw keys normalize to the same key the later
/// value wins and the entry keeps its first position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    /// Entries in insertion order.
    entries: Vec<(NormalizedKey, String)>,
    /// Maps each key to its position in `entries`.
    index: HashMap<NormalizedKey, usize>,
}

impl NormalizedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize every key of `record` and format every value.
    ///
    /// `context` is the text the formatter scans for geometry markers,
    /// usually the lesson topic.
    pub fn from_record(record: &Record, context: &str, formatter: &ValueFormatter) -> Self {
        let mut normalized = Self::new();
        for (raw_key, value) in record.iter() {
            let key = normalize_key(raw_key);
            let text = formatter.format(&key, value, context);
            normalized.insert(key, text);
        }
        normalized
    }

    /// Insert a formatted value, returning the value it replaced.
    pub fn insert(&mut self, key: NormalizedKey, value: String) -> Option<String> {
        match self.index.get(&key) {
            Some(&position) => self
                .entries
                .get_mut(position)
                .map(|(_, existing)| mem::replace(existing, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get a value by normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Get the stored key and value for a normalized key.
    pub fn get_key_value(&self, key: &str) -> Option<(&NormalizedKey, &str)> {
        let position = *self.index.get(key)?;
        self.entries
            .get(position)
            .map(|(key, value)| (key, value.as_str()))
    }

    /// Whether the normalized key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedKey, &str)> {
        self.entries.iter().map(|(key, value)| (key, value.as_str()))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &NormalizedKey> {
        self.entries.iter().map(|(key, _)| key)
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

impl FromIterator<(NormalizedKey, String)> for NormalizedRecord {
    fn from_iter<I: IntoIterator<Item = (NormalizedKey, String)>>(iter: I) -> Self {
        let mut record = NormalizedRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
