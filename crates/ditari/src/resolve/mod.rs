//! Placeholder key resolution.
//!
//! A placeholder key is matched against a [`NormalizedRecord`](crate::NormalizedRecord)
//! in three tiers: exact key, containment (one key contains the other), and
//! fuzzy similarity above a cutoff. Failing all three is not an error; the
//! placeholder is simply left in the document.

mod resolver;
mod similarity;

pub use resolver::{ContainmentTieBreak, KeyResolver, Match, MatchTier};
pub use similarity::{Similarity, gestalt_ratio};
