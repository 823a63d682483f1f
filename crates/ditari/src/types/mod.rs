mod field_value;
mod normalized_key;
mod normalized_record;
mod record;

pub use field_value::{FieldValue, LIST_SEPARATOR, join_items};
pub use normalized_key::{KEY_SEPARATOR, NormalizedKey, normalize_key};
pub use normalized_record::NormalizedRecord;
pub use record::{Record, RecordError};
