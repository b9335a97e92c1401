use super::PrefixMap;
use qp_trie::Trie;

/// A prefix map backed by a qp-trie
///
/// This is the default lexeme table (`qp-trie` feature, enabled by default). A lookup walks the
/// input one character at a time and stops at the first prefix no stored key extends, so it
/// costs `O(longest_match)` regardless of table size.
///
/// # Example
/// ```
/// use arith_analyzer::prefix_map::QpTriePrefixMap;
/// use arith_analyzer::LEXEMES;
///
/// let table = QpTriePrefixMap::from_iter(LEXEMES);
/// ```
#[derive(Debug, Clone)]
pub struct QpTriePrefixMap<V>(Trie<Vec<u8>, V>);

impl<K, V> FromIterator<(K, V)> for QpTriePrefixMap<V>
where
    K: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        QpTriePrefixMap(
            iter.into_iter()
                .filter(|(key, _)| !key.as_ref().is_empty())
                .map(|(key, val)| (key.as_ref().as_bytes().to_vec(), val))
                .collect(),
        )
    }
}

impl<V> PrefixMap<V> for QpTriePrefixMap<V> {
    fn get_longest_prefix<P: AsRef<str>>(&self, inp: P) -> Option<(usize, &V)> {
        let inp = inp.as_ref();
        let bytes = inp.as_bytes();
        let mut subtrie = self.0.subtrie(&bytes[..0]);
        let mut best = None;
        for end in inp.char_indices().map(|(start, chr)| start + chr.len_utf8()) {
            let prefix = &bytes[..end];
            subtrie = subtrie.subtrie(prefix);
            if subtrie.is_empty() {
                break;
            }
            if let Some(val) = subtrie.get(prefix) {
                best = Some((end, val));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::{PrefixMap, QpTriePrefixMap};

    #[test]
    fn longest_key_wins() {
        let map = QpTriePrefixMap::from_iter([("c", 0), ("cos", 1), ("ta", 2), ("ta", 3)]);
        assert_eq!(map.get_longest_prefix("cosh"), Some((3, &1)));
        assert_eq!(map.get_longest_prefix("co"), Some((1, &0)));
        assert_eq!(map.get_longest_prefix("tan"), Some((2, &3)));
        assert_eq!(map.get_longest_prefix("x"), None);
        assert_eq!(map.get_longest_prefix("💖"), None);
    }

    #[test]
    fn stops_once_no_key_extends() {
        let map = QpTriePrefixMap::from_iter([("", 0), ("(", 1), ("sin", 2)]);
        assert_eq!(map.get_longest_prefix("si("), None);
        assert_eq!(map.get_longest_prefix("(sin"), Some((1, &1)));
        assert_eq!(map.get_longest_prefix(""), None);
    }
}
