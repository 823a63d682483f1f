use bon::Builder;
use ditari_semantics::{DEFAULT_FUZZY_CUTOFF, SHORT_VALUE_LIMIT};
use serde::{Deserialize, Serialize};

use crate::format::ValueFormatter;
use crate::resolve::{ContainmentTieBreak, KeyResolver, Similarity};

/// Settings for one fill pass.
///
/// Missing fields take their defaults when deserialized, so a settings file
/// only needs the values it changes.
///
/// # Example
///
/// ```
/// use ditari::{FillOptions, Similarity};
///
/// let options = FillOptions::builder()
///     .fuzzy_cutoff(0.75)
///     .similarity(Similarity::JaroWinkler)
///     .build();
/// assert!(options.enrich);
///
/// let from_json: FillOptions = serde_json::from_str(r#"{ "enrich": false }"#).unwrap();
/// assert_eq!(from_json.fuzzy_cutoff, 0.6);
/// assert!(!from_json.enrich);
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct FillOptions {
    /// Lowest similarity ratio the fuzzy tier accepts (inclusive).
    #[builder(default = DEFAULT_FUZZY_CUTOFF)]
    pub fuzzy_cutoff: f64,

    /// Metric used by the fuzzy tier.
    #[builder(default)]
    pub similarity: Similarity,

    /// How the partial tier chooses among several candidates.
    #[builder(default)]
    pub tie_break: ContainmentTieBreak,

    /// Append teaching guidance to lesson-flow fields.
    #[builder(default = true)]
    pub enrich: bool,

    /// Character count below which a lesson-flow value counts as short.
    #[builder(default = SHORT_VALUE_LIMIT)]
    pub short_value_limit: usize,
}

impl Default for FillOptions {
    fn default() -> Self {
        FillOptions::builder().build()
    }
}

impl FillOptions {
    /// The resolver these options describe.
    pub fn resolver(&self) -> KeyResolver {
        KeyResolver::builder()
            .fuzzy_cutoff(self.fuzzy_cutoff)
            .similarity(self.similarity)
            .tie_break(self.tie_break)
            .build()
    }

    /// The value formatter these options describe.
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::builder()
            .enrich(self.enrich)
            .short_value_limit(self.short_value_limit)
            .build()
    }
}
