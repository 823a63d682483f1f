use bon::Builder;
use ditari_semantics::{
    ACTIVITY_SUGGESTION, ASCII_DIAGRAM, DIAGRAM_SUGGESTION, FieldRole, SHORT_VALUE_LIMIT,
    SUMMARY_SUGGESTION, field_role, mentions_geometry,
};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::parser::parse_list_literal;
use crate::types::{FieldValue, NormalizedKey, join_items};

/// Formats raw values into display text.
///
/// Formatting rules, in order:
/// 1. `Empty` becomes the empty string.
/// 2. Sequences are joined with `", "`.
/// 3. Text that looks like a bracketed list is parsed (strict JSON first,
///    then the permissive literal grammar) and joined the same way.
/// 4. Anything else is displayed as-is.
/// 5. Keyword fields have literal `[` and `]` removed and are trimmed.
/// 6. Lesson-flow fields get guidance appended (see [`ValueFormatter::append_guidance`]).
///
/// Rules 5 and 6 apply to text reaching rule 4; lists from rules 2 and 3
/// are returned as joined.
///
/// # Example
///
/// ```
/// use ditari::{FieldValue, NormalizedKey, ValueFormatter};
///
/// let formatter = ValueFormatter::builder().enrich(false).build();
/// let key = NormalizedKey::from("burimet");
/// let value = FieldValue::Text("[\"libri\", \"tabela\"]".into());
/// assert_eq!(formatter.format(&key, &value, ""), "libri, tabela");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ValueFormatter {
    /// Append guidance to lesson-flow fields.
    #[builder(default = true)]
    enrich: bool,

    /// Values with fewer characters than this get the activity suggestion,
    /// longer ones the summary suggestion.
    #[builder(default = SHORT_VALUE_LIMIT)]
    short_value_limit: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter::builder().build()
    }
}

/// Format `value` with the default [`ValueFormatter`].
///
/// `context` is extra text (usually the lesson topic) scanned for geometry
/// markers alongside the value.
pub fn format_value(key: &NormalizedKey, value: &FieldValue, context: &str) -> String {
    ValueFormatter::default().format(key, value, context)
}

/// Parse text that looks like a bracketed list into its elements.
///
/// Returns `None` when the trimmed text is not bracketed or neither the
/// strict nor the permissive grammar accepts it.
pub fn parse_list_text(text: &str) -> Option<Vec<FieldValue>> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return None;
    }

    match serde_json::from_str::<Vec<JsonValue>>(trimmed) {
        Ok(items) => Some(items.into_iter().map(FieldValue::from).collect()),
        Err(json_error) => match parse_list_literal(trimmed) {
            Ok(items) => Some(items),
            Err(literal_error) => {
                trace!(%json_error, %literal_error, "list-like text kept verbatim");
                None
            }
        },
    }
}

impl ValueFormatter {
    /// Whether lesson-flow fields receive guidance.
    pub fn enriches(&self) -> bool {
        self.enrich
    }

    /// Length below which a value counts as short.
    pub fn short_value_limit(&self) -> usize {
        self.short_value_limit
    }

    /// Format `value` for the field `key`.
    pub fn format(&self, key: &NormalizedKey, value: &FieldValue, context: &str) -> String {
        let text = match value {
            FieldValue::Empty => return String::new(),
            FieldValue::Sequence(items) => return join_items(items),
            FieldValue::Text(text) => match parse_list_text(text) {
                Some(items) => return join_items(&items),
                None => text.clone(),
            },
            FieldValue::Scalar(text) => text.clone(),
        };

        match field_role(key.as_str()) {
            FieldRole::Keywords => strip_brackets(&text),
            FieldRole::Pedagogy if self.enrich => self.append_guidance(text, context),
            FieldRole::Pedagogy | FieldRole::Plain => text,
        }
    }

    /// Append teaching guidance to a lesson-flow value.
    ///
    /// Short values (measured in `char`s) get a three-part activity
    /// suggestion, others a summary suggestion. When the context or the value
    /// mentions geometry, a drawing suggestion and a small sketch follow.
    pub fn append_guidance(&self, text: String, context: &str) -> String {
        let suggestion = if text.chars().count() < self.short_value_limit {
            ACTIVITY_SUGGESTION
        } else {
            SUMMARY_SUGGESTION
        };
        let draws_figure = mentions_geometry(&format!("{context} {text}"));

        let mut enriched = text;
        enriched.push_str(suggestion);
        if draws_figure {
            enriched.push_str(DIAGRAM_SUGGESTION);
            enriched.push_str(ASCII_DIAGRAM);
        }
        enriched
    }
}

/// Remove literal brackets and surrounding whitespace.
fn strip_brackets(text: &str) -> String {
    text.replace(['[', ']'], "").trim().to_string()
}
