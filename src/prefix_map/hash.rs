use super::PrefixMap;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A prefix map that probes one hash map from the longest key length downwards
///
/// This is the default table when the `qp-trie` feature is disabled. A lookup costs at most one
/// hash probe per byte of the longest stored key, which for arithmetic lexemes is three.
///
/// # Example
/// ```
/// use arith_analyzer::prefix_map::HashPrefixMap;
/// use arith_analyzer::LEXEMES;
///
/// let table = HashPrefixMap::from_iter(LEXEMES);
/// ```
#[derive(Debug, Clone)]
pub struct HashPrefixMap<V, S = RandomState> {
    entries: HashMap<Box<str>, V, S>,
    longest: usize,
}

impl<V, S> HashPrefixMap<V, S>
where
    S: BuildHasher + Default,
{
    /// Create from an iterator of entries using a custom hasher
    ///
    /// Later duplicates replace earlier ones and empty keys are dropped.
    pub fn from_iter_hasher<K, I>(iter: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries = HashMap::default();
        let mut longest = 0;
        for (key, val) in iter {
            let key = key.as_ref();
            if key.is_empty() {
                continue;
            }
            longest = longest.max(key.len());
            entries.insert(Box::from(key), val);
        }
        HashPrefixMap { entries, longest }
    }
}

impl<K, V> FromIterator<(K, V)> for HashPrefixMap<V>
where
    K: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_iter_hasher(iter)
    }
}

impl<V, S> PrefixMap<V> for HashPrefixMap<V, S>
where
    S: BuildHasher,
{
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        (1..=self.longest.min(inp.len()))
            .rev()
            .filter(|&len| inp.is_char_boundary(len))
            .find_map(|len| self.entries.get(&inp[..len]).map(|val| (len, val)))
    }
}
