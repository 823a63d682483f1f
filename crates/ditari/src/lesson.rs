//! Completion of generated lesson-plan records.
//!
//! Generated plans regularly omit fields the diary form expects. Before a
//! record is used for filling, the topic is guaranteed, the education field
//! mirrors the subject, and the evaluation notes are rebuilt from the
//! learning results.

use ditari_semantics::{
    EDUCATION_FIELD, EVALUATION_NOTES_FIELD, RESULTS_FIELD, SUBJECT_FIELD, TOPIC_FIELD,
    evaluation_notes,
};
use tracing::debug;

use crate::types::{FieldValue, Record, normalize_key};

/// Fill in the fields a lesson-plan record must carry.
///
/// - `tema` is added with `topic` when no key normalizes to `tema`.
/// - `arsimi` is copied from `lenda` when `arsimi` is absent and `lenda`
///   present.
/// - `shenime_vleresuese` is always replaced by three evaluation notes,
///   N2 to N4, one per line. N2 quotes `rezultatet` when it has a value.
///
/// # Example
///
/// ```
/// use ditari::{complete_lesson_record, record};
///
/// let mut plan = record! { "lenda" => "Matematikë" };
/// complete_lesson_record(&mut plan, "Teorema e Pitagorës");
///
/// assert_eq!(plan.get("tema").unwrap().to_string(), "Teorema e Pitagorës");
/// assert_eq!(plan.get("arsimi").unwrap().to_string(), "Matematikë");
/// assert_eq!(plan.get("shenime_vleresuese").unwrap().to_string().lines().count(), 3);
/// ```
pub fn complete_lesson_record(record: &mut Record, topic: &str) {
    let has_topic = record
        .iter()
        .any(|(key, _)| normalize_key(key).as_str() == TOPIC_FIELD);
    if !has_topic {
        debug!(topic, "lesson record has no topic field, using requested topic");
        record.insert(TOPIC_FIELD, topic);
    }

    let mirrored_subject = match record.get(SUBJECT_FIELD) {
        Some(subject) if !record.contains_key(EDUCATION_FIELD) => Some(subject.clone()),
        _ => None,
    };
    if let Some(subject) = mirrored_subject {
        record.insert(EDUCATION_FIELD, subject);
    }

    let results = record
        .get(RESULTS_FIELD)
        .filter(|value| !value.is_blank())
        .map(FieldValue::to_string);
    let lesson_topic = record
        .get(TOPIC_FIELD)
        .filter(|value| !value.is_blank())
        .map_or_else(|| topic.to_string(), FieldValue::to_string);

    let notes = evaluation_notes(results.as_deref(), &lesson_topic);
    record.insert(EVALUATION_NOTES_FIELD, notes.join("\n"));
}
