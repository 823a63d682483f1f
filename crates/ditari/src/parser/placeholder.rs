//! Placeholder scanner.
//!
//! Finds every `{{ key }}` span in a text. The scan is non-greedy: a span
//! closes at the first `}}` after its `{{`. Whitespace around the key is
//! trimmed and may include line breaks, but the key itself may not; a
//! candidate whose key spans lines is not a placeholder and scanning resumes
//! one character later.

use std::ops::Range;

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, take_until};

type Input<'i> = LocatingSlice<&'i str>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A placeholder found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    /// Byte range of the whole `{{ ... }}` token in the scanned text.
    pub range: Range<usize>,
    /// The key between the braces, trimmed but not normalized.
    pub key: String,
}

/// Find all placeholders in `text`, in order of appearance.
///
/// Spans never overlap.
///
/// ```
/// use ditari::parser::find_placeholders;
///
/// let spans = find_placeholders("Tema: {{ tema }}, klasa {{klasa}}");
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[0].key, "tema");
/// assert_eq!(spans[0].range, 6..16);
/// assert_eq!(spans[1].key, "klasa");
/// ```
pub fn find_placeholders(text: &str) -> Vec<PlaceholderSpan> {
    let mut input = LocatingSlice::new(text);
    let segments: ModalResult<Vec<Option<PlaceholderSpan>>> =
        repeat(0.., segment).parse_next(&mut input);
    // `any` accepts every character, so the scan only stops at end of input.
    segments
        .map(|segments| segments.into_iter().flatten().collect())
        .unwrap_or_default()
}

/// Whether `text` contains at least one placeholder.
pub fn has_placeholder(text: &str) -> bool {
    text.contains(OPEN) && !find_placeholders(text).is_empty()
}

/// A placeholder, or a single character that starts none.
fn segment(input: &mut Input<'_>) -> ModalResult<Option<PlaceholderSpan>> {
    alt((placeholder.map(Some), any.value(None))).parse_next(input)
}

/// Parse `{{ key }}`, closing at the first `}}`.
fn placeholder(input: &mut Input<'_>) -> ModalResult<PlaceholderSpan> {
    delimited(OPEN, take_until(0.., CLOSE), CLOSE)
        .verify(|inner: &str| !inner.trim().contains('\n'))
        .with_span()
        .map(|(inner, range): (&str, Range<usize>)| PlaceholderSpan {
            range,
            key: inner.trim().to_string(),
        })
        .parse_next(input)
}
