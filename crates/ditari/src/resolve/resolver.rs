use bon::Builder;
use ditari_semantics::DEFAULT_FUZZY_CUTOFF;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Similarity;
use crate::types::{NormalizedKey, NormalizedRecord};

/// Which tier of the resolver produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The placeholder key is a record key.
    Exact,
    /// One key contains the other.
    Partial,
    /// The similarity ratio reached the cutoff.
    Fuzzy,
}

/// Rule for choosing among several containment candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentTieBreak {
    /// The candidate inserted into the record first.
    #[default]
    FirstInserted,
    /// The shortest candidate key; insertion order breaks length ties.
    ShortestKey,
}

/// A record entry chosen for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'r> {
    /// The record key that matched.
    pub key: &'r NormalizedKey,
    /// The formatted value stored under `key`.
    pub value: &'r str,
    /// The tier that produced the match.
    pub tier: MatchTier,
    /// Similarity ratio; `1.0` for exact and partial matches.
    pub score: f64,
}

/// Resolves normalized placeholder keys against a [`NormalizedRecord`].
///
/// Resolution order, first success wins:
/// 1. Exact: the key is present in the record.
/// 2. Partial: a record key contains the placeholder key or is contained by
///    it. Candidates are considered in record order and the
///    [`ContainmentTieBreak`] rule picks among them.
/// 3. Fuzzy: the record key with the highest [`Similarity`] ratio, accepted
///    when the ratio is at least `fuzzy_cutoff`. Ties go to the first
///    inserted key on purpose, not to the lexicographically larger one.
///
/// Empty keys get no special treatment. An empty placeholder key matches an
/// empty record key exactly, or else the first record key by containment.
/// An empty record key is contained in every placeholder key.
///
/// # Example
///
/// ```
/// use ditari::{KeyResolver, MatchTier, NormalizedKey, NormalizedRecord};
///
/// let record: NormalizedRecord = [
///     (NormalizedKey::from("tema"), "Pitagora".to_string()),
///     (NormalizedKey::from("fjalet_kryesore"), "kateti, hipotenuza".to_string()),
/// ]
/// .into_iter()
/// .collect();
///
/// let resolver = KeyResolver::default();
/// let found = resolver.resolve(&NormalizedKey::from("fjalët kyçe"), &record).unwrap();
/// assert_eq!(found.key.as_str(), "fjalet_kryesore");
/// assert_eq!(found.tier, MatchTier::Fuzzy);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct KeyResolver {
    /// Lowest similarity ratio the fuzzy tier accepts (inclusive).
    #[builder(default = DEFAULT_FUZZY_CUTOFF)]
    fuzzy_cutoff: f64,

    /// Metric used by the fuzzy tier.
    #[builder(default)]
    similarity: Similarity,

    /// How the partial tier chooses among several candidates.
    #[builder(default)]
    tie_break: ContainmentTieBreak,
}

impl Default for KeyResolver {
    fn default() -> Self {
        KeyResolver::builder().build()
    }
}

impl KeyResolver {
    /// The fuzzy acceptance threshold.
    pub fn fuzzy_cutoff(&self) -> f64 {
        self.fuzzy_cutoff
    }

    /// Find the record entry for `key`, or `None` when no tier matches.
    pub fn resolve<'r>(&self, key: &NormalizedKey, record: &'r NormalizedRecord) -> Option<Match<'r>> {
        if let Some((found, value)) = record.get_key_value(key.as_str()) {
            return Some(Match {
                key: found,
                value,
                tier: MatchTier::Exact,
                score: 1.0,
            });
        }

        if let Some((found, value)) = self.partial(key, record) {
            return Some(Match {
                key: found,
                value,
                tier: MatchTier::Partial,
                score: 1.0,
            });
        }

        self.fuzzy(key, record)
    }

    fn partial<'r>(
        &self,
        key: &NormalizedKey,
        record: &'r NormalizedRecord,
    ) -> Option<(&'r NormalizedKey, &'r str)> {
        let mut candidates = record
            .iter()
            .filter(|(candidate, _)| overlaps(key.as_str(), candidate.as_str()));

        match self.tie_break {
            ContainmentTieBreak::FirstInserted => candidates.next(),
            ContainmentTieBreak::ShortestKey => {
                candidates.min_by_key(|(candidate, _)| candidate.as_str().len())
            }
        }
    }

    fn fuzzy<'r>(&self, key: &NormalizedKey, record: &'r NormalizedRecord) -> Option<Match<'r>> {
        let mut best: Option<Match<'r>> = None;
        for (candidate, value) in record.iter() {
            let score = self.similarity.ratio(candidate.as_str(), key.as_str());
            trace!(key = %key, candidate = %candidate, score, "fuzzy candidate");
            if best.as_ref().is_none_or(|current| score > current.score) {
                best = Some(Match {
                    key: candidate,
                    value,
                    tier: MatchTier::Fuzzy,
                    score,
                });
            }
        }
        best.filter(|found| found.score >= self.fuzzy_cutoff)
    }
}

/// Whether one key contains the other. Prefixes are containments too.
fn overlaps(key: &str, candidate: &str) -> bool {
    key.contains(candidate) || candidate.contains(key)
}
