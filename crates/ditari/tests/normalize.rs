//! Tests for key normalization.

use ditari::{NormalizedKey, normalize_key};
use pretty_assertions::assert_eq;

#[test]
fn lowercases_and_joins_words() {
    assert_eq!(normalize_key("Tema Kryesore").as_str(), "tema_kryesore");
    assert_eq!(normalize_key("KLASA").as_str(), "klasa");
}

#[test]
fn strips_diacritics() {
    assert_eq!(normalize_key("fjalët_kyçe").as_str(), "fjalet_kyce");
    assert_eq!(normalize_key("Lënda").as_str(), "lenda");
    assert_eq!(
        normalize_key("Lidhja e temës me njohuritë e mëparshme").as_str(),
        "lidhja_e_temes_me_njohurite_e_meparshme"
    );
}

#[test]
fn strips_diacritics_in_decomposed_input() {
    // "e" followed by a combining diaeresis.
    assert_eq!(normalize_key("Le\u{0308}nda").as_str(), "lenda");
}

#[test]
fn applies_compatibility_decomposition() {
    assert_eq!(normalize_key("ﬁzika").as_str(), "fizika");
    assert_eq!(normalize_key("klasa ²").as_str(), "klasa_2");
}

#[test]
fn collapses_separator_runs() {
    assert_eq!(normalize_key("tema -- e / mesimit").as_str(), "tema_e_mesimit");
    assert_eq!(normalize_key("a__b").as_str(), "a_b");
    assert_eq!(normalize_key("a.b,c").as_str(), "a_b_c");
}

#[test]
fn trims_leading_and_trailing_separators() {
    assert_eq!(normalize_key("  --tema--  ").as_str(), "tema");
    assert_eq!(normalize_key("_klasa_").as_str(), "klasa");
}

#[test]
fn drops_characters_without_ascii_form() {
    assert_eq!(normalize_key("тема").as_str(), "");
    assert_eq!(normalize_key("tema 📘 kryesore").as_str(), "tema_kryesore");
}

#[test]
fn empty_and_symbol_only_keys_normalize_to_empty() {
    assert!(normalize_key("").is_empty());
    assert!(normalize_key("§§ !! ??").is_empty());
}

#[test]
fn keeps_digits() {
    assert_eq!(normalize_key("Kompetenca 1").as_str(), "kompetenca_1");
    assert_eq!(normalize_key("10A").as_str(), "10a");
}

#[test]
fn normalizing_twice_changes_nothing() {
    for raw in ["Tema Kryesore", "fjalët_kyçe", "  --x--  ", "", "Ndërtimi i njohurive"] {
        let once = normalize_key(raw);
        assert_eq!(normalize_key(once.as_str()), once, "{raw:?}");
    }
}

#[test]
fn normalized_key_conversions() {
    let key = NormalizedKey::from("Fjalët Kyçe");
    assert_eq!(key.to_string(), "fjalet_kyce");
    assert_eq!(NormalizedKey::from(String::from("fjalet kyce")), key);
    assert_eq!(String::from(key.clone()), "fjalet_kyce");
    assert_eq!(NormalizedKey::new("FJALET-KYCE"), key);
}

#[test]
fn normalized_key_serde_normalizes_on_read() {
    let key: NormalizedKey = serde_json::from_str("\"Tema Kryesore\"").unwrap();
    assert_eq!(key.as_str(), "tema_kryesore");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"tema_kryesore\"");
}
