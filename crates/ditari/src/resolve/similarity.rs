//! String similarity metrics for fuzzy key matching.

use std::mem;

use serde::{Deserialize, Serialize};

/// Similarity metric used by the fuzzy tier. All metrics return a ratio in
/// `0.0..=1.0`, where `1.0` means identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    /// Ratcliff/Obershelp matching-blocks ratio, see [`gestalt_ratio`].
    #[default]
    Gestalt,
    /// One minus the Levenshtein distance over the longer length.
    Levenshtein,
    /// Jaro-Winkler similarity.
    JaroWinkler,
    /// Sørensen-Dice coefficient over character bigrams.
    SorensenDice,
}

impl Similarity {
    /// Similarity of `a` and `b` under this metric.
    pub fn ratio(self, a: &str, b: &str) -> f64 {
        match self {
            Similarity::Gestalt => gestalt_ratio(a, b),
            Similarity::Levenshtein => strsim::normalized_levenshtein(a, b),
            Similarity::JaroWinkler => strsim::jaro_winkler(a, b),
            Similarity::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }
}

/// Ratcliff/Obershelp similarity: `2 * M / T`.
///
/// `M` is the number of characters in matching blocks, found by taking the
/// longest common block and recursing on the pieces to its left and right;
/// `T` is the total number of characters in both strings. Two empty strings
/// are identical.
///
/// ```
/// use ditari::resolve::gestalt_ratio;
///
/// assert_eq!(gestalt_ratio("abcde", "abcxy"), 0.6);
/// assert_eq!(gestalt_ratio("tema", "tema"), 1.0);
/// assert_eq!(gestalt_ratio("abc", "xyz"), 0.0);
/// ```
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * matching_characters(&a, &b)) as f64 / total as f64
}

/// A half-open window `a[a_lo..a_hi]` against `b[b_lo..b_hi]`.
#[derive(Clone, Copy)]
struct Window {
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![Window {
        a_lo: 0,
        a_hi: a.len(),
        b_lo: 0,
        b_hi: b.len(),
    }];

    while let Some(window) = pending.pop() {
        let (i, j, size) = longest_block(a, b, window);
        if size == 0 {
            continue;
        }
        matched += size;
        if window.a_lo < i && window.b_lo < j {
            pending.push(Window {
                a_hi: i,
                b_hi: j,
                ..window
            });
        }
        if i + size < window.a_hi && j + size < window.b_hi {
            pending.push(Window {
                a_lo: i + size,
                b_lo: j + size,
                ..window
            });
        }
    }

    matched
}

/// Longest common block inside `window` as `(start in a, start in b, size)`.
///
/// Among equally long blocks the one ending first in `a`, then first in
/// `b`, wins.
fn longest_block(a: &[char], b: &[char], window: Window) -> (usize, usize, usize) {
    let width = window.b_hi - window.b_lo + 1;
    let mut best = (window.a_lo, window.b_lo, 0);
    // previous[j - b_lo + 1] is the block length ending at (i - 1, j).
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in window.a_lo..window.a_hi {
        current.fill(0);
        for j in window.b_lo..window.b_hi {
            if a[i] != b[j] {
                continue;
            }
            let column = j - window.b_lo;
            let size = previous[column] + 1;
            current[column + 1] = size;
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        mem::swap(&mut previous, &mut current);
    }

    best
}
