//! Shared lesson-diary tables used by the fill engine.
//!
//! This crate centralizes the field names, enrichment texts and thresholds
//! that give some template fields special treatment, so the formatter and
//! the record helpers read them from one place.

/// How the formatter treats a field, derived from its normalized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    /// Keyword lists: literal brackets are stripped from the text.
    Keywords,
    /// Lesson-flow fields that receive appended teaching guidance.
    Pedagogy,
    /// Everything else.
    Plain,
}

/// Substring of a normalized key that marks a keywords field.
pub const KEYWORDS_MARKER: &str = "fjalet";

/// Normalized keys of the lesson-flow fields that receive guidance text.
pub const PEDAGOGY_FIELDS: &[&str] = &[
    "lidhja_e_temes_me_njohurite_e_meparshme",
    "ndertimi_i_njohurive",
    "perforcimi_i_te_nxenit",
];

/// Lowercase substrings that mark a topic or text as geometry related.
pub const GEOMETRY_MARKERS: &[&str] = &[
    "gjeometr",
    "trekënd",
    "triang",
    "trigonometri",
    "figura",
    "forma",
    "shkronj",
];

/// Values shorter than this many characters count as short.
pub const SHORT_VALUE_LIMIT: usize = 80;

/// Lowest similarity ratio accepted by fuzzy key matching.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;

/// Appended to short pedagogy values.
pub const ACTIVITY_SUGGESTION: &str = " Shtoni: (1) Pyetje hyrëse për aktivizim, (2) Aktivitet praktik me shembuj, (3) Diskutim/ndarje grupesh.";

/// Appended to pedagogy values at or above [`SHORT_VALUE_LIMIT`].
pub const SUMMARY_SUGGESTION: &str = " Përmbledhje: shfrytëzoni aktivitete praktike, pyetje kontrolluese dhe ushtrime aplikuese.";

/// Appended to pedagogy values whose context mentions geometry.
pub const DIAGRAM_SUGGESTION: &str =
    " Vizatoni në tabelë: trekëndësh të drejtë (katetet a, b; hipotenuza c) dhe etiketoji.";

/// Right-triangle sketch appended after [`DIAGRAM_SUGGESTION`].
pub const ASCII_DIAGRAM: &str =
    "\n[Shembull vizatimi ASCII]\n   |\\\n   | \\\n b |  \\ c\n   |___\\\n     a\n";

/// Record field holding the lesson topic.
pub const TOPIC_FIELD: &str = "tema";
/// Record field holding the subject.
pub const SUBJECT_FIELD: &str = "lenda";
/// Record field mirrored from [`SUBJECT_FIELD`] when absent.
pub const EDUCATION_FIELD: &str = "arsimi";
/// Record field holding the expected learning results.
pub const RESULTS_FIELD: &str = "rezultatet";
/// Record field rebuilt from the topic and results.
pub const EVALUATION_NOTES_FIELD: &str = "shenime_vleresuese";

/// Fields a generated daily lesson plan is expected to carry.
pub const LESSON_PLAN_FIELDS: &[&str] = &[
    "fusha",
    "lenda",
    "shkalla",
    "klasa",
    "tema",
    "tema_2",
    "situata",
    "lidhja",
    "burimet",
    "fjalet_kryesore",
    "metodologjia",
    "lidhja_e_temes_me_njohurite_e_meparshme",
    "ndertimi_i_njohurive",
    "perforcimi_i_te_nxenit",
    "rezultatet",
    "shenime_vleresuese",
    "detyra_shtepie",
];

/// Classify a normalized key.
///
/// The keywords marker is checked first, so a key that is both a keywords
/// field and listed in [`PEDAGOGY_FIELDS`] is treated as keywords.
pub fn field_role(normalized_key: &str) -> FieldRole {
    if normalized_key.contains(KEYWORDS_MARKER) {
        FieldRole::Keywords
    } else if PEDAGOGY_FIELDS.contains(&normalized_key) {
        FieldRole::Pedagogy
    } else {
        FieldRole::Plain
    }
}

/// Whether `text` contains any of the [`GEOMETRY_MARKERS`], ignoring case.
pub fn mentions_geometry(text: &str) -> bool {
    let lowered = text.to_lowercase();
    GEOMETRY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// The three evaluation notes (levels N2, N3 and N4) for a lesson.
///
/// The N2 note quotes the expected results when they are known.
pub fn evaluation_notes(results: Option<&str>, topic: &str) -> [String; 3] {
    let n2 = match results {
        Some(results) if !results.is_empty() => format!(
            "N2: Nxënësi kryen veprime për të arritur rezultatin e pritshëm ({results})."
        ),
        _ => "N2: Nxënësi kryen veprime të përshtatshme për të demonstruar zotësitë e pritura."
            .to_string(),
    };
    let n3 = format!(
        "N3: Nxënësi njohon dhe përshkruan masat/konceptet e nevojshme lidhur me temën '{topic}'."
    );
    let n4 = "N4: Nxënësi përdor vetinë për të zgjidhur detyra të ngjashme dhe tregon aplikim praktik."
        .to_string();
    [n2, n3, n4]
}
