//! End-to-end tests for filling table documents.

use ditari::document::{Cell, Document, Paragraph, Row, Run, RunStyle, Table};
use ditari::{
    FillOptions, FillReport, MatchTier, Record, Replacement, TemplateFiller, complete_lesson_record,
    fill_template, record,
};
use ditari_semantics::ACTIVITY_SUGGESTION;
use pretty_assertions::assert_eq;

fn single_cell(paragraphs: Vec<Paragraph>) -> Document {
    Document::new(vec![Table::new(vec![Row::new(vec![Cell::new(paragraphs)])])])
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new(vec![Run::new(text)])
}

fn texts(document: &Document) -> Vec<String> {
    document.paragraphs().map(Paragraph::text).collect()
}

#[test]
fn exact_key_fills_in_place() {
    let record = record! { "Tema Kryesore" => "Trekëndëshi" };
    let mut document = single_cell(vec![paragraph("Tema: {{tema_kryesore}}")]);

    let report = fill_template(&mut document, &record, "Trekëndëshi", &FillOptions::default());

    assert_eq!(texts(&document), vec!["Tema: Trekëndëshi"]);
    assert_eq!(
        report.replacements,
        vec![Replacement {
            placeholder: "tema_kryesore".to_string(),
            key: "tema_kryesore".into(),
            tier: MatchTier::Exact,
            score: 1.0,
        }]
    );
    assert!(report.is_complete());
}

#[test]
fn misspelled_keyword_placeholder_matches_fuzzily() {
    let record = record! {
        "tema" => "Teorema e Pitagorës",
        "fjalet_kryesore" => vec!["kateti", "hipotenuza"],
    };
    let mut document = single_cell(vec![paragraph("Fjalët kyçe: {{fjalët_kyçe}}")]);

    let report = fill_template(&mut document, &record, "", &FillOptions::default());

    assert_eq!(texts(&document), vec!["Fjalët kyçe: kateti, hipotenuza"]);
    assert_eq!(report.replacements.len(), 1);
    assert_eq!(report.replacements[0].tier, MatchTier::Fuzzy);
    assert_eq!(report.replacements[0].key.as_str(), "fjalet_kryesore");
}

#[test]
fn unmatched_placeholder_is_left_verbatim() {
    let record = record! { "tema" => "Pitagora", "fjalet_kryesore" => "kateti" };
    let mut document = single_cell(vec![paragraph("Shënim: {{zzz_qqq}}")]);

    let report = fill_template(&mut document, &record, "", &FillOptions::default());

    assert_eq!(texts(&document), vec!["Shënim: {{zzz_qqq}}"]);
    assert_eq!(report.unresolved, vec!["zzz_qqq"]);
    assert!(!report.is_complete());
}

#[test]
fn walks_every_table_row_and_cell() {
    let record = record! { "a" => "1", "b" => "2", "c" => "3" };
    let mut document = Document::new(vec![
        Table::new(vec![
            Row::new(vec![
                Cell::new(vec![paragraph("{{a}}")]),
                Cell::new(vec![paragraph("pa vend"), paragraph("{{b}}")]),
            ]),
            Row::new(vec![Cell::default()]),
        ]),
        Table::new(vec![Row::new(vec![Cell::new(vec![paragraph("{{c}}")])])]),
    ]);

    let report = fill_template(&mut document, &record, "", &FillOptions::default());

    assert_eq!(texts(&document), vec!["1", "pa vend", "2", "3"]);
    assert_eq!(report.paragraphs, 3);
    assert_eq!(report.replacements.len(), 3);
}

#[test]
fn styled_runs_survive_filling() {
    let bold = RunStyle::builder().bold(true).font("Calibri".to_string()).build();
    let record = record! { "klasa" => 10 };
    let mut document = single_cell(vec![Paragraph::new(vec![
        Run::new("Klasa: {{kla"),
        Run::styled("sa}}", bold.clone()),
        Run::styled(" (viti shkollor)", bold.clone()),
    ])]);

    fill_template(&mut document, &record, "", &FillOptions::default());

    let runs = &document.tables[0].rows[0].cells[0].paragraphs[0].runs;
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "Klasa: 10");
    assert_eq!(runs[1].text, "");
    assert_eq!(runs[1].style, bold);
    assert_eq!(runs[2].text, " (viti shkollor)");
}

#[test]
fn lesson_flow_fields_are_enriched_when_filled() {
    let record = record! { "Ndërtimi i njohurive" => "Punë në grupe." };
    let mut document = single_cell(vec![paragraph("{{ndertimi_i_njohurive}}")]);

    fill_template(&mut document, &record, "Algjebra", &FillOptions::default());
    assert_eq!(
        texts(&document),
        vec![format!("Punë në grupe.{ACTIVITY_SUGGESTION}")]
    );

    let mut plain = single_cell(vec![paragraph("{{ndertimi_i_njohurive}}")]);
    let options = FillOptions::builder().enrich(false).build();
    fill_template(&mut plain, &record, "Algjebra", &options);
    assert_eq!(texts(&plain), vec!["Punë në grupe."]);
}

#[test]
fn filler_can_be_reused() {
    let record = record! { "tema" => "Pitagora" };
    let filler = TemplateFiller::new(&record, "", &FillOptions::default());
    assert_eq!(filler.record().get("tema"), Some("Pitagora"));

    for _ in 0..2 {
        let mut document = single_cell(vec![paragraph("{{tema}}")]);
        let report = filler.fill(&mut document);
        assert_eq!(texts(&document), vec!["Pitagora"]);
        assert_eq!(report.replacements.len(), 1);
    }
}

#[test]
fn fill_runs_accepts_loose_runs() {
    let record = record! { "tema" => "Pitagora" };
    let filler = TemplateFiller::new(&record, "", &FillOptions::default());
    let mut runs = vec![Run::new("{{tema}} / {{tjeter}}")];
    let mut report = FillReport::default();

    filler.fill_runs(&mut runs, &mut report);

    assert_eq!(runs[0].text, "Pitagora / {{tjeter}}");
    assert_eq!(report.paragraphs, 1);
    assert_eq!(report.unresolved, vec!["tjeter"]);
}

#[test]
fn report_lists_tiers_in_document_order() {
    let record = record! {
        "tema" => "Pitagora",
        "klasa" => 10,
        "fjalet_kryesore" => "kateti",
    };
    let mut document = single_cell(vec![
        paragraph("{{fjalet_kyce}} {{tema}}"),
        paragraph("{{klasa_e_dhjete}}"),
    ]);

    let report = fill_template(&mut document, &record, "", &FillOptions::default());

    let summary: Vec<String> = report
        .replacements
        .iter()
        .map(|replacement| {
            format!(
                "{} -> {} ({:?})",
                replacement.placeholder, replacement.key, replacement.tier
            )
        })
        .collect();
    insta::assert_snapshot!(summary.join("\n"), @r"
    fjalet_kyce -> fjalet_kryesore (Fuzzy)
    tema -> tema (Exact)
    klasa_e_dhjete -> klasa (Partial)
    ");
    assert_eq!(report.by_tier(MatchTier::Exact).count(), 1);
}

#[test]
fn document_round_trips_through_json_and_fills() {
    let json = r#"{
        "tables": [{
            "rows": [{
                "cells": [{
                    "paragraphs": [{
                        "runs": [
                            { "text": "Lënda: {{lë" },
                            { "text": "nda}}", "style": { "bold": true } }
                        ]
                    }]
                }]
            }]
        }]
    }"#;
    let mut document = Document::from_json_str(json).unwrap();
    let record: Record = serde_json::from_str(r#"{ "Lënda": "Matematikë" }"#).unwrap();

    fill_template(&mut document, &record, "", &FillOptions::default());

    let encoded = document.to_json_string().unwrap();
    let decoded = Document::from_json_str(&encoded).unwrap();
    assert_eq!(decoded, document);
    assert_eq!(texts(&decoded), vec!["Lënda: Matematikë"]);
    assert!(decoded.tables[0].rows[0].cells[0].paragraphs[0].runs[1].style.bold);
}

#[test]
fn completed_lesson_record_fills_evaluation_notes() {
    let mut record = record! {
        "lenda" => "Matematikë",
        "rezultatet" => vec!["zbaton teoremën"],
    };
    complete_lesson_record(&mut record, "Teorema e Pitagorës");
    let mut document = single_cell(vec![
        paragraph("{{tema}}"),
        paragraph("{{arsimi}}"),
        paragraph("{{shenime_vleresuese}}"),
    ]);

    let report = fill_template(&mut document, &record, "Teorema e Pitagorës", &FillOptions::default());

    assert!(report.is_complete());
    let texts = texts(&document);
    assert_eq!(texts[0], "Teorema e Pitagorës");
    assert_eq!(texts[1], "Matematikë");
    assert!(texts[2].starts_with("N2: "));
    assert!(texts[2].contains("(zbaton teoremën)"));
}
