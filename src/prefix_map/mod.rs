//! Lexeme tables keyed by string prefix
//!
//! The lexer recognizes every fixed lexeme (function names, operators and brackets) by asking a
//! table for the longest key that prefixes the remaining input. Matching the longest prefix is
//! what lets `sin` win over a generic identifier, and what makes `sinh` lex as `sin` followed by
//! `h`.
//!
//! Two backends are provided:
//! - [QpTriePrefixMap] (default, `qp-trie` feature) walks a qp-trie one character at a time and
//!   stops as soon as no key can extend the current prefix.
//! - [HashPrefixMap] probes a single hash map from the longest possible key length downwards.
//!   With the `fnv` feature, [FnvHashPrefixMap] uses the fnv hasher, which is faster for the
//!   handful of short keys a lexeme table holds.
//!
//! Empty keys are ignored by every backend, since a zero-length lexeme would never advance the
//! lexer.
//!
//! # Example
//!
//! ```
//! use arith_analyzer::prefix_map::{HashPrefixMap, PrefixMap};
//! use arith_analyzer::{Kind, Lexer, LEXEMES};
//!
//! let table = HashPrefixMap::from_iter(LEXEMES);
//! assert_eq!(table.get_longest_prefix("cos(x)"), Some((3, &Kind::Function)));
//! let tokens: Vec<_> = Lexer::with_table("cos(x)", &table).collect();
//! assert_eq!(tokens.len(), 4);
//! ```

mod hash;
#[cfg(feature = "qp-trie")]
mod trie;

#[cfg(feature = "fnv")]
use ::fnv::FnvBuildHasher;
pub use hash::HashPrefixMap;
#[cfg(feature = "qp-trie")]
pub use trie::QpTriePrefixMap;

/// A hash prefix map using the fnv hasher
///
/// Requires the `fnv` feature.
///
/// # Example
/// ```
/// use arith_analyzer::prefix_map::FnvHashPrefixMap;
/// use arith_analyzer::LEXEMES;
///
/// let table = FnvHashPrefixMap::from_iter_hasher(LEXEMES);
/// ```
#[cfg(feature = "fnv")]
pub type FnvHashPrefixMap<V> = HashPrefixMap<V, FnvBuildHasher>;

/// A map that can find the value stored under the longest key prefixing an input
pub trait PrefixMap<V> {
    /// Get the byte length and value of the longest non-empty key that is a prefix of `inp`
    ///
    /// # Example
    /// ```
    /// use arith_analyzer::prefix_map::{HashPrefixMap, PrefixMap};
    ///
    /// let map = HashPrefixMap::from_iter([("s", 1), ("sin", 3)]);
    /// assert_eq!(map.get_longest_prefix("si"), Some((1, &1)));
    /// assert_eq!(map.get_longest_prefix("sinh"), Some((3, &3)));
    /// ```
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)>;
}
