use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

use icu_normalizer::DecomposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

/// Separator written between the alphanumeric runs of a normalized key.
pub const KEY_SEPARATOR: char = '_';

/// A key in canonical comparable form.
///
/// A normalized key contains only `[a-z0-9_]`, never starts or ends with
/// `_` and never contains `__`. Building one from any string goes through
/// [`normalize_key`], so normalizing a `NormalizedKey` again yields itself.
///
/// # Example
///
/// ```
/// use ditari::NormalizedKey;
///
/// let key = NormalizedKey::from("Fjalët Kyçe!");
/// assert_eq!(key.as_str(), "fjalet_kyce");
/// assert_eq!(NormalizedKey::from(key.as_str()), key);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Normalize `raw` into a key.
    pub fn new(raw: &str) -> Self {
        normalize_key(raw)
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Canonicalize a human-written key.
///
/// Applies Unicode compatibility decomposition, drops every non-ASCII
/// character (which removes the combining marks left by decomposition),
/// lowercases, and collapses each run of characters outside `[a-z0-9]` into
/// a single `_`. Leading and trailing separators are dropped. Never fails;
/// the worst case is an empty key.
///
/// ```
/// use ditari::normalize_key;
///
/// assert_eq!(normalize_key("Tema Kryesore").as_str(), "tema_kryesore");
/// assert_eq!(normalize_key("  --Lidhja e temës--  ").as_str(), "lidhja_e_temes");
/// assert_eq!(normalize_key("§§").as_str(), "");
/// ```
pub fn normalize_key(raw: &str) -> NormalizedKey {
    let decomposed = DecomposingNormalizerBorrowed::new_nfkd().normalize(raw);
    let mut key = String::with_capacity(decomposed.len());
    let mut pending_separator = false;

    for c in decomposed.chars().filter(char::is_ascii) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push(KEY_SEPARATOR);
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    NormalizedKey(key)
}

impl Display for NormalizedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedKey {
    fn from(raw: &str) -> Self {
        normalize_key(raw)
    }
}

impl From<String> for NormalizedKey {
    fn from(raw: String) -> Self {
        normalize_key(&raw)
    }
}

impl From<NormalizedKey> for String {
    fn from(key: NormalizedKey) -> Self {
        key.0
    }
}
