pub mod document;
pub mod engine;
pub mod format;
pub mod lesson;
pub mod parser;
pub mod resolve;
pub mod types;

pub use document::{Document, DocumentError, TextRun};
pub use engine::{FillOptions, FillReport, Replacement, TemplateFiller, fill_template};
pub use format::{ValueFormatter, format_value};
pub use lesson::complete_lesson_record;
pub use resolve::{ContainmentTieBreak, KeyResolver, Match, MatchTier, Similarity};
pub use types::{
    FieldValue, NormalizedKey, NormalizedRecord, Record, RecordError, normalize_key,
};

/// Creates a [`Record`] from key-value pairs, in the order given.
///
/// Values are converted via `Into<FieldValue>`, so strings, integers,
/// floats, booleans and vectors can be passed directly.
///
/// # Example
///
/// ```
/// use ditari::{FieldValue, record};
///
/// let plan = record! {
///     "Tema" => "Trekëndëshi",
///     "Klasa" => 10,
///     "fjalet_kryesore" => vec!["kateti", "hipotenuza"],
/// };
/// assert_eq!(plan.len(), 3);
/// assert_eq!(plan.get("Klasa"), Some(&FieldValue::Scalar("10".into())));
/// assert_eq!(plan.get("fjalet_kryesore").unwrap().to_string(), "kateti, hipotenuza");
/// ```
#[macro_export]
macro_rules! record {
    {} => {
        $crate::Record::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut record = $crate::Record::new();
            $(
                record.insert($key.to_string(), ::std::convert::Into::<$crate::FieldValue>::into($value));
            )+
            record
        }
    };
}
