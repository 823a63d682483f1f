//! Tests for records, response extraction and lesson-record completion.

use std::error::Error;

use ditari::{FieldValue, Record, RecordError, complete_lesson_record, record};
use ditari_semantics::{EVALUATION_NOTES_FIELD, evaluation_notes};
use pretty_assertions::assert_eq;

fn keys(record: &Record) -> Vec<&str> {
    record.iter().map(|(key, _)| key).collect()
}

// =========================================================================
// Record
// =========================================================================

#[test]
fn insert_keeps_order_and_replaces_in_place() {
    let mut record = Record::new();
    record.insert("b", 1);
    record.insert("a", 2);
    record.insert("b", 3);
    assert_eq!(keys(&record), vec!["b", "a"]);
    assert_eq!(record.get("b"), Some(&FieldValue::Scalar("3".into())));
}

#[test]
fn raw_keys_are_kept_verbatim() {
    let record = record! { "Tema Kryesore" => "x" };
    assert!(record.contains_key("Tema Kryesore"));
    assert!(!record.contains_key("tema_kryesore"));
}

#[test]
fn empty_record_macro() {
    let record = record! {};
    assert!(record.is_empty());
}

#[test]
fn json_object_keeps_key_order() {
    let record: Record = serde_json::from_str(r#"{"z": 1, "a": [1, "b"], "m": null}"#).unwrap();
    assert_eq!(keys(&record), vec!["z", "a", "m"]);
    assert_eq!(
        record.get("a"),
        Some(&FieldValue::Sequence(vec![
            FieldValue::Scalar("1".into()),
            FieldValue::Text("b".into()),
        ]))
    );
    assert_eq!(record.get("m"), Some(&FieldValue::Empty));
}

#[test]
fn from_json_rejects_non_objects() {
    let err = Record::from_json(serde_json::json!([1, 2])).unwrap_err();
    assert!(matches!(err, RecordError::NotAnObject { found: "an array" }));
    assert_eq!(err.to_string(), "expected a JSON object, found an array");
}

#[test]
fn collects_from_pairs() {
    let record: Record = [("tema", "a"), ("klasa", "b")].into_iter().collect();
    assert_eq!(record.len(), 2);
}

// =========================================================================
// Response extraction
// =========================================================================

#[test]
fn parses_bare_json_response() {
    let record = Record::from_response_text(r#"  {"tema": "Pitagora"}  "#).unwrap();
    assert_eq!(record.get("tema"), Some(&FieldValue::Text("Pitagora".into())));
}

#[test]
fn extracts_object_from_surrounding_prose() {
    let response = "Sigurisht! Ja plani:\n```json\n{\"tema\": \"Pitagora\", \"klasa\": 8}\n```\nSuksese!";
    let record = Record::from_response_text(response).unwrap();
    assert_eq!(keys(&record), vec!["tema", "klasa"]);
}

#[test]
fn response_without_object_is_an_error() {
    let err = Record::from_response_text("Nuk mund ta gjeneroj planin.").unwrap_err();
    assert!(matches!(err, RecordError::NoJsonObject { .. }));

    let err = Record::from_response_text("} mbrapsht {").unwrap_err();
    assert!(matches!(err, RecordError::NoJsonObject { .. }));
}

#[test]
fn invalid_object_is_an_error_with_source() {
    let err = Record::from_response_text("Ja: {tema: Pitagora}").unwrap_err();
    let RecordError::InvalidJson { response, .. } = &err else {
        panic!("expected InvalidJson, got {err:?}");
    };
    assert_eq!(response, "Ja: {tema: Pitagora}");
    assert!(err.source().is_some());
}

#[test]
fn json_array_response_is_not_an_object() {
    let err = Record::from_response_text("[1, 2]").unwrap_err();
    assert!(matches!(err, RecordError::NotAnObject { .. }));
}

// =========================================================================
// Lesson-record completion
// =========================================================================

#[test]
fn adds_missing_topic() {
    let mut record = record! { "klasa" => 8 };
    complete_lesson_record(&mut record, "Thyesat");
    assert_eq!(record.get("tema"), Some(&FieldValue::Text("Thyesat".into())));
}

#[test]
fn keeps_topic_under_any_spelling() {
    let mut record = record! { "Tema" => "Ekuacionet" };
    complete_lesson_record(&mut record, "Thyesat");
    assert!(!record.contains_key("tema"));
    assert_eq!(record.get("Tema"), Some(&FieldValue::Text("Ekuacionet".into())));
}

#[test]
fn mirrors_subject_into_education_field() {
    let mut record = record! { "lenda" => "Fizikë" };
    complete_lesson_record(&mut record, "Forca");
    assert_eq!(record.get("arsimi"), Some(&FieldValue::Text("Fizikë".into())));
}

#[test]
fn keeps_existing_education_field() {
    let mut record = record! { "lenda" => "Fizikë", "arsimi" => "I mesëm" };
    complete_lesson_record(&mut record, "Forca");
    assert_eq!(record.get("arsimi"), Some(&FieldValue::Text("I mesëm".into())));
}

#[test]
fn no_education_field_without_subject() {
    let mut record = Record::new();
    complete_lesson_record(&mut record, "Forca");
    assert!(!record.contains_key("arsimi"));
}

#[test]
fn evaluation_notes_quote_results() {
    let mut record = record! { "tema" => "Forca", "rezultatet" => "mat forcën" };
    complete_lesson_record(&mut record, "Forca");
    let expected = evaluation_notes(Some("mat forcën"), "Forca").join("\n");
    assert_eq!(
        record.get(EVALUATION_NOTES_FIELD),
        Some(&FieldValue::Text(expected))
    );
}

#[test]
fn evaluation_notes_without_results_use_generic_n2() {
    let mut record = record! { "rezultatet" => "" };
    complete_lesson_record(&mut record, "Forca");
    let notes = record.get(EVALUATION_NOTES_FIELD).unwrap().to_string();
    let lines: Vec<&str> = notes.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "N2: Nxënësi kryen veprime të përshtatshme për të demonstruar zotësitë e pritura."
    );
    assert!(lines[1].contains("'Forca'"));
    assert!(lines[2].starts_with("N4: "));
}

#[test]
fn evaluation_notes_are_always_rebuilt() {
    let mut record = record! { "shenime_vleresuese" => "vjetër", "tema" => "Forca" };
    complete_lesson_record(&mut record, "Tjetër");
    let notes = record.get(EVALUATION_NOTES_FIELD).unwrap().to_string();
    assert!(notes.starts_with("N2: "));
    assert!(notes.contains("'Forca'"));
    assert_eq!(keys(&record), vec!["shenime_vleresuese", "tema"]);
}
