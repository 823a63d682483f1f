//! Template filling.
//!
//! This module ties the pieces together: [`TemplateFiller`] builds the
//! normalized record once, then walks a document's table cells and hands
//! each paragraph containing placeholders to the run-preserving
//! substitution in [`substitute`].

mod fill;
mod options;
mod report;
pub mod substitute;

pub use fill::{TemplateFiller, fill_template};
pub use options::FillOptions;
pub use report::{FillReport, Replacement};
pub use substitute::{ParagraphReport, RunEdit, SpanOutcome, SpanReport, substitute_placeholders};
