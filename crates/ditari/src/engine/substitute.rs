//! Run-preserving placeholder substitution.
//!
//! A paragraph's visible text is split across formatting runs, and a
//! placeholder may start in one run and end in another. Offsets are taken in
//! the concatenated text, mapped back onto runs, and only the runs a
//! placeholder touches are rewritten:
//! - the start run keeps its text before the placeholder, followed by the
//!   replacement
//! - the end run keeps its text after the placeholder
//! - runs strictly between them are emptied but kept, with their style
//!
//! Spans are processed from last to first so earlier offsets stay valid.
//! All edits are applied to an owned copy of the run texts and written back
//! once at the end.

use std::ops::Range;

use tracing::trace;

use crate::document::TextRun;
use crate::parser::{PlaceholderSpan, find_placeholders};

/// New text for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEdit {
    /// Index of the run in the paragraph.
    pub run: usize,
    /// The run's complete new text.
    pub text: String,
}

/// What happened to one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanOutcome {
    /// The placeholder was replaced.
    Replaced,
    /// The key did not resolve; the placeholder text was kept.
    Unresolved,
    /// The span could not be mapped onto the runs; nothing changed.
    Unmapped,
}

/// Outcome for one placeholder of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanReport {
    /// The placeholder key as written, trimmed.
    pub key: String,
    /// Byte range of the placeholder in the original paragraph text.
    pub range: Range<usize>,
    pub outcome: SpanOutcome,
}

/// Per-paragraph substitution summary, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphReport {
    pub spans: Vec<SpanReport>,
}

impl ParagraphReport {
    /// Number of placeholders replaced.
    pub fn replaced(&self) -> usize {
        self.count(SpanOutcome::Replaced)
    }

    /// Number of placeholders left in place.
    pub fn unresolved(&self) -> usize {
        self.count(SpanOutcome::Unresolved) + self.count(SpanOutcome::Unmapped)
    }

    fn count(&self, outcome: SpanOutcome) -> usize {
        self.spans
            .iter()
            .filter(|span| span.outcome == outcome)
            .count()
    }
}

/// Where a span starts and ends in run coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanLocation {
    start_run: usize,
    start_offset: usize,
    end_run: usize,
    end_offset: usize,
}

/// Replace every placeholder in `runs` whose key `resolve` answers.
///
/// `resolve` is called once per placeholder, last placeholder first, and
/// returns the replacement text or `None` to leave the placeholder as it is.
/// Run styles are never touched and no run is added or removed. A paragraph
/// without placeholders is left exactly as it was.
///
/// # Example
///
/// ```
/// use ditari::document::{Run, RunStyle};
/// use ditari::engine::substitute_placeholders;
///
/// let bold = RunStyle::builder().bold(true).build();
/// let mut runs = vec![
///     Run::new("Tema: {{te"),
///     Run::styled("ma}} sot", bold.clone()),
/// ];
/// let report = substitute_placeholders(&mut runs, |span| {
///     (span.key == "tema").then(|| "Pitagora".to_string())
/// });
///
/// assert_eq!(report.replaced(), 1);
/// assert_eq!(runs[0].text, "Tema: Pitagora");
/// assert_eq!(runs[1].text, " sot");
/// assert_eq!(runs[1].style, bold);
/// ```
pub fn substitute_placeholders<R: TextRun>(
    runs: &mut [R],
    mut resolve: impl FnMut(&PlaceholderSpan) -> Option<String>,
) -> ParagraphReport {
    let full_text: String = runs.iter().map(TextRun::text).collect();
    let spans = find_placeholders(&full_text);
    if spans.is_empty() {
        return ParagraphReport::default();
    }

    let mut texts: Vec<String> = runs.iter().map(|run| run.text().to_owned()).collect();
    let mut reports = Vec::with_capacity(spans.len());

    for span in spans.iter().rev() {
        let outcome = match resolve(span) {
            None => SpanOutcome::Unresolved,
            Some(replacement) => {
                match locate_span(&texts, &span.range)
                    .and_then(|location| plan_edits(&texts, location, &replacement))
                {
                    Some(edits) => {
                        apply_edits(&mut texts, edits);
                        SpanOutcome::Replaced
                    }
                    None => {
                        trace!(key = %span.key, range = ?span.range, "placeholder span not mapped onto runs");
                        SpanOutcome::Unmapped
                    }
                }
            }
        };
        reports.push(SpanReport {
            key: span.key.clone(),
            range: span.range.clone(),
            outcome,
        });
    }

    for (run, text) in runs.iter_mut().zip(texts) {
        if run.text() != text {
            run.set_text(text);
        }
    }

    reports.reverse();
    ParagraphReport { spans: reports }
}

/// Map a byte range of the concatenated text onto runs.
///
/// The start run is the first whose end lies past `range.start`; the end run
/// is the first whose end reaches `range.end`.
fn locate_span(texts: &[String], range: &Range<usize>) -> Option<SpanLocation> {
    let mut start = None;
    let mut run_start = 0;

    for (index, text) in texts.iter().enumerate() {
        let run_end = run_start + text.len();
        if start.is_none() && run_end > range.start {
            start = Some((index, range.start - run_start));
        }
        if run_end >= range.end {
            let (start_run, start_offset) = start?;
            return Some(SpanLocation {
                start_run,
                start_offset,
                end_run: index,
                end_offset: range.end - run_start,
            });
        }
        run_start = run_end;
    }

    None
}

/// Edits that splice `replacement` over the located span.
///
/// Returns `None` if an offset does not fall on a character boundary.
fn plan_edits(texts: &[String], location: SpanLocation, replacement: &str) -> Option<Vec<RunEdit>> {
    let prefix = texts.get(location.start_run)?.get(..location.start_offset)?;
    let suffix = texts.get(location.end_run)?.get(location.end_offset..)?;

    if location.start_run == location.end_run {
        return Some(vec![RunEdit {
            run: location.start_run,
            text: format!("{prefix}{replacement}{suffix}"),
        }]);
    }

    let mut edits = vec![RunEdit {
        run: location.start_run,
        text: format!("{prefix}{replacement}"),
    }];
    edits.extend(
        (location.start_run + 1..location.end_run).map(|run| RunEdit {
            run,
            text: String::new(),
        }),
    );
    edits.push(RunEdit {
        run: location.end_run,
        text: suffix.to_string(),
    });
    Some(edits)
}

fn apply_edits(texts: &mut [String], edits: Vec<RunEdit>) {
    for edit in edits {
        if let Some(text) = texts.get_mut(edit.run) {
            *text = edit.text;
        }
    }
}
