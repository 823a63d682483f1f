//! In-memory model of a table-based rich-text document.
//!
//! A document is a list of tables; each cell holds paragraphs and each
//! paragraph is an ordered list of formatting runs. The substitution engine
//! only needs the [`TextRun`] view of a run, so other document models can
//! plug in by implementing that trait.

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading or writing a serialized document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON could not be decoded into a document.
    #[error("invalid document JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The document could not be encoded.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Text access to a formatting run.
///
/// Implementors own their style; the engine only reads and replaces text.
pub trait TextRun {
    /// The run's text.
    fn text(&self) -> &str;

    /// Replace the run's text, leaving its style untouched.
    fn set_text(&mut self, text: String);
}

/// Character formatting of a run.
///
/// # Example
///
/// ```
/// use ditari::document::RunStyle;
///
/// let heading = RunStyle::builder()
///     .bold(true)
///     .font("Times New Roman".to_string())
///     .size_pt(12.0)
///     .build();
/// assert!(heading.bold);
/// assert_eq!(heading.font.as_deref(), Some("Times New Roman"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    #[builder(default)]
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,

    #[builder(default)]
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,

    #[builder(default)]
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,

    /// Font family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    /// Font size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f32>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A contiguous fragment of text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub style: RunStyle,
}

impl Run {
    /// A run with the default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// A run with an explicit style.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl TextRun for Run {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// An ordered sequence of runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// The visible text: all run texts concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// A table-based form document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Decode a document from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Decode)
    }

    /// Encode the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Encode)
    }

    /// Every paragraph of every cell, table by table, row by row.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.tables
            .iter()
            .flat_map(|table| &table.rows)
            .flat_map(|row| &row.cells)
            .flat_map(|cell| &cell.paragraphs)
    }

    /// Mutable access to every paragraph, in the same order as [`Document::paragraphs`].
    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.tables
            .iter_mut()
            .flat_map(|table| &mut table.rows)
            .flat_map(|row| &mut row.cells)
            .flat_map(|cell| &mut cell.paragraphs)
    }
}
