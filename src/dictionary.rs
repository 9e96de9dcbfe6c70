//! This module implements the generic, order-preserving dictionary codec.
//!
//! A [`Dictionary`] is built once from a finite, single-pass sequence of
//! values, deduplicates them, sorts them ascending, and assigns each value a
//! minimal fixed-width big-endian ordinal code. Byte-lexicographic order on
//! the codes equals the natural order of the values, so callers can compare,
//! binary-search, and bin encoded column bytes without ever decoding them.
//!
//! One generic component covers both the integer and the string variants;
//! [`IntDictionary`] and [`StringDictionary`] are plain type aliases, not
//! duplicated code. A dictionary is immutable after construction and safe
//! for unsynchronized concurrent reads.

use std::hash::Hash;

use hashbrown::HashSet;

use crate::error::KolomError;
use crate::kernels::ordinal::{encode_ordinal, width_for_count};

//==================================================================================
// 1. Value Trait
//==================================================================================

/// The bounds a type must satisfy to be dictionary-encoded: a total order
/// for sorting and searching, hashing for deduplication, and cloning so the
/// dictionary can own its sorted universe.
pub trait DictValue: Ord + Eq + Hash + Clone {}

impl<T: Ord + Eq + Hash + Clone> DictValue for T {}

//==================================================================================
// 2. Dictionary
//==================================================================================

/// An order-preserving dictionary over integer values.
pub type IntDictionary = Dictionary<i64>;

/// An order-preserving dictionary over lexicographically ordered strings.
pub type StringDictionary = Dictionary<String>;

/// A sorted, deduplicated value universe with fixed-width ordinal codes.
#[derive(Debug, Clone)]
pub struct Dictionary<T> {
    /// The unique values, sorted ascending.
    values: Vec<T>,
    /// Flat buffer of codes; `codes[i*width..(i+1)*width]` encodes `values[i]`.
    codes: Vec<u8>,
    width: usize,
}

impl<T: DictValue> Dictionary<T> {
    /// Builds a dictionary from a finite, single-pass producer of values.
    ///
    /// The source is consumed exactly once, so very large inputs can be
    /// streamed through without being materialized twice. Duplicates are
    /// collapsed before sorting.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let set: HashSet<T> = source.into_iter().collect();
        let width = width_for_count(set.len());

        let mut values: Vec<T> = set.into_iter().collect();
        values.sort_unstable();

        let mut codes = Vec::with_capacity(values.len() * width);
        for ordinal in 0..values.len() {
            codes.extend_from_slice(&encode_ordinal(ordinal as u64, width));
        }

        log::debug!(
            "dictionary built: {} unique values, code width {} byte(s)",
            values.len(),
            width
        );

        Self {
            values,
            codes,
            width,
        }
    }

    /// The fixed width, in bytes, of every code issued by this dictionary.
    pub fn code_width(&self) -> usize {
        self.width
    }

    /// Number of distinct values in the dictionary.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the code for a value seen at construction time, or `None` for
    /// a value that was never stored. A miss is ordinary control flow, not a
    /// fault; range-query callers branch to [`Dictionary::transform`].
    pub fn encode(&self, v: &T) -> Option<&[u8]> {
        let idx = self.values.binary_search(v).ok()?;
        Some(self.code_at(idx))
    }

    /// Decodes a code previously issued by [`Dictionary::encode`] back into
    /// its value.
    ///
    /// Decoding is exact-match: a code of the wrong width, or one this
    /// dictionary never issued, fails loudly with
    /// [`KolomError::UnknownCode`] rather than silently mapping to a
    /// neighboring value.
    pub fn decode(&self, code: &[u8]) -> Result<&T, KolomError> {
        if self.width == 0 || code.len() != self.width {
            return Err(KolomError::UnknownCode(format!(
                "expected a {}-byte code, got {} byte(s)",
                self.width,
                code.len()
            )));
        }
        let idx = self.lower_bound_code(code);
        if idx == self.values.len() || self.code_at(idx) != code {
            return Err(KolomError::UnknownCode(format!(
                "code {code:?} was never issued by this dictionary"
            )));
        }
        Ok(&self.values[idx])
    }

    /// Brackets a value that is not necessarily in the dictionary.
    ///
    /// Returns `(lower, upper)` where `lower` is the code of the greatest
    /// stored value `< v` (`None` when `v` is below every stored value) and
    /// `upper` is the code of the smallest stored value `>= v` (`None` when
    /// `v` is above every stored value). For a stored `v`, `upper` is the
    /// code of `v` itself. Both sides are `None` on an empty dictionary.
    ///
    /// A single lower-bound lookup resolves both sides, which lets callers
    /// bracket an out-of-dictionary range bound using encoded comparisons
    /// only.
    pub fn transform(&self, v: &T) -> (Option<&[u8]>, Option<&[u8]>) {
        let idx = self.values.partition_point(|stored| stored < v);
        let lower = (idx > 0).then(|| self.code_at(idx - 1));
        let upper = (idx < self.values.len()).then(|| self.code_at(idx));
        (lower, upper)
    }

    fn code_at(&self, idx: usize) -> &[u8] {
        &self.codes[idx * self.width..(idx + 1) * self.width]
    }

    /// First index whose code is `>= code`, by byte-lexicographic comparison
    /// on the flat code buffer. Because codes are fixed-width big-endian,
    /// this is also numeric ordinal order.
    fn lower_bound_code(&self, code: &[u8]) -> usize {
        let (mut lo, mut hi) = (0, self.values.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.code_at(mid) < code {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

impl<T: DictValue> FromIterator<T> for Dictionary<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
