use tracing::{debug, trace};

use super::{FillOptions, FillReport, Replacement, SpanOutcome, substitute_placeholders};
use crate::document::{Document, TextRun};
use crate::parser::has_placeholder;
use crate::resolve::KeyResolver;
use crate::types::{NormalizedKey, NormalizedRecord, Record};

/// Fills placeholders from one record.
///
/// The record is normalized and formatted once, up front; the filler can
/// then be applied to any number of documents or loose run lists.
///
/// # Example
///
/// ```
/// use ditari::document::{Cell, Document, Paragraph, Row, Run, Table};
/// use ditari::{FillOptions, TemplateFiller, record};
///
/// let record = record! { "Tema Kryesore" => "Trekëndëshi" };
/// let filler = TemplateFiller::new(&record, "Gjeometri", &FillOptions::default());
///
/// let paragraph = Paragraph::new(vec![Run::new("Tema: {{tema_kryesore}}")]);
/// let mut document = Document::new(vec![Table::new(vec![Row::new(vec![Cell::new(vec![
///     paragraph,
/// ])])])]);
///
/// let report = filler.fill(&mut document);
/// assert!(report.is_complete());
/// assert_eq!(document.paragraphs().next().unwrap().text(), "Tema: Trekëndëshi");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateFiller {
    record: NormalizedRecord,
    resolver: KeyResolver,
}

impl TemplateFiller {
    /// Normalize `record` for filling.
    ///
    /// `topic` is the lesson topic; the formatter scans it for geometry
    /// markers when enriching lesson-flow fields.
    pub fn new(record: &Record, topic: &str, options: &FillOptions) -> Self {
        let formatter = options.formatter();
        Self {
            record: NormalizedRecord::from_record(record, topic, &formatter),
            resolver: options.resolver(),
        }
    }

    /// Use an already normalized record and resolver as they are.
    pub fn from_parts(record: NormalizedRecord, resolver: KeyResolver) -> Self {
        Self { record, resolver }
    }

    /// The display-ready record placeholders are filled from.
    pub fn record(&self) -> &NormalizedRecord {
        &self.record
    }

    /// Fill every table-cell paragraph of `document` in place.
    pub fn fill(&self, document: &mut Document) -> FillReport {
        let mut report = FillReport::default();
        for paragraph in document.paragraphs_mut() {
            if !has_placeholder(&paragraph.text()) {
                continue;
            }
            self.fill_runs(&mut paragraph.runs, &mut report);
        }

        debug!(
            paragraphs = report.paragraphs,
            replaced = report.replacements.len(),
            unresolved = report.unresolved.len(),
            unmapped = report.unmapped.len(),
            "template filled"
        );
        report
    }

    /// Fill the placeholders of one paragraph, given as its runs.
    ///
    /// Outcomes are appended to `report`.
    pub fn fill_runs<R: TextRun>(&self, runs: &mut [R], report: &mut FillReport) {
        let mut matched: Vec<(usize, Replacement)> = Vec::new();
        let paragraph = substitute_placeholders(runs, |span| {
            let key = NormalizedKey::new(&span.key);
            let found = self.resolver.resolve(&key, &self.record)?;
            debug!(
                placeholder = %span.key,
                key = %found.key,
                tier = ?found.tier,
                score = found.score,
                "placeholder resolved"
            );
            matched.push((
                span.range.start,
                Replacement {
                    placeholder: span.key.clone(),
                    key: found.key.clone(),
                    tier: found.tier,
                    score: found.score,
                },
            ));
            Some(found.value.to_string())
        });

        if paragraph.spans.is_empty() {
            return;
        }
        report.paragraphs += 1;

        for span in paragraph.spans {
            match span.outcome {
                SpanOutcome::Replaced => {
                    let position = matched
                        .iter()
                        .position(|(start, _)| *start == span.range.start);
                    if let Some(position) = position {
                        report.replacements.push(matched.swap_remove(position).1);
                    }
                }
                SpanOutcome::Unresolved => {
                    debug!(placeholder = %span.key, "placeholder left unresolved");
                    report.unresolved.push(span.key);
                }
                SpanOutcome::Unmapped => {
                    trace!(placeholder = %span.key, range = ?span.range, "placeholder skipped");
                    report.unmapped.push(span.key);
                }
            }
        }
    }
}

/// Fill `document` from `record` in one call.
///
/// Shorthand for [`TemplateFiller::new`] followed by [`TemplateFiller::fill`].
pub fn fill_template(
    document: &mut Document,
    record: &Record,
    topic: &str,
    options: &FillOptions,
) -> FillReport {
    TemplateFiller::new(record, topic, options).fill(document)
}
