use serde::Serialize;

use crate::resolve::MatchTier;
use crate::types::NormalizedKey;

/// A placeholder that was filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replacement {
    /// The placeholder key as written in the document.
    pub placeholder: String,
    /// The record key it resolved to.
    pub key: NormalizedKey,
    /// The resolver tier that found `key`.
    pub tier: MatchTier,
    /// Similarity ratio; `1.0` for exact and partial matches.
    pub score: f64,
}

/// Summary of a fill pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FillReport {
    /// Paragraphs that contained at least one placeholder.
    pub paragraphs: usize,
    /// Placeholders that were replaced.
    pub replacements: Vec<Replacement>,
    /// Placeholder keys no tier could resolve. Their text is still in the
    /// document.
    pub unresolved: Vec<String>,
    /// Placeholder keys that resolved but could not be mapped onto runs.
    pub unmapped: Vec<String>,
}

impl FillReport {
    /// Whether every placeholder was replaced.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.unmapped.is_empty()
    }

    /// Replacements produced by the given tier.
    pub fn by_tier(&self, tier: MatchTier) -> impl Iterator<Item = &Replacement> {
        self.replacements
            .iter()
            .filter(move |replacement| replacement.tier == tier)
    }
}
