use super::char_trait::TrieChar;

/// A borrowed key: something that can be walked through a trie one label at a time.
///
/// Lookups take keys by reference and never copy them. The trie first checks
/// [`key_len`](Key::key_len) against the shortest and longest key reachable
/// from a node, then follows [`key_chars`](Key::key_chars) edge by edge.
///
/// Implemented for `str` and `String` (as `char` keys), for `[C]`, `Vec<C>`
/// and `[C; N]` over any label type, and for references to any of these.
///
/// ```
/// use libctrie::ctrie::Key;
///
/// assert_eq!(Key::<char>::key_len("åäö"), 3);
/// assert_eq!(Key::<u8>::key_len(b"GET"), 3);
/// ```
pub trait Key<C: TrieChar> {
    /// Number of labels [`key_chars`](Key::key_chars) yields.
    fn key_len(&self) -> usize;

    /// The labels of the key, first to last.
    fn key_chars(&self) -> impl Iterator<Item = C> + '_;
}

impl Key<char> for str {
    #[inline]
    fn key_len(&self) -> usize {
        if self.is_ascii() {
            self.len()
        } else {
            self.chars().count()
        }
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl Key<char> for String {
    #[inline]
    fn key_len(&self) -> usize {
        self.as_str().key_len()
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl<C: TrieChar> Key<C> for [C] {
    #[inline]
    fn key_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = C> + '_ {
        self.iter().copied()
    }
}

impl<C: TrieChar> Key<C> for Vec<C> {
    #[inline]
    fn key_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = C> + '_ {
        self.iter().copied()
    }
}

impl<C: TrieChar, const N: usize> Key<C> for [C; N] {
    #[inline]
    fn key_len(&self) -> usize {
        N
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = C> + '_ {
        self.iter().copied()
    }
}

impl<C: TrieChar, K: Key<C> + ?Sized> Key<C> for &K {
    #[inline]
    fn key_len(&self) -> usize {
        (**self).key_len()
    }

    #[inline]
    fn key_chars(&self) -> impl Iterator<Item = C> + '_ {
        (**self).key_chars()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels<C: TrieChar, K: Key<C> + ?Sized>(key: &K) -> Vec<C> {
        key.key_chars().collect()
    }

    #[test]
    fn str_length_counts_chars_not_bytes() {
        assert_eq!(Key::<char>::key_len("GET"), 3);
        assert_eq!(Key::<char>::key_len("åäö"), 3);
        assert_eq!(Key::<char>::key_len("授人以渔"), 4);
        assert_eq!(labels("åäö"), ['å', 'ä', 'ö']);
    }

    #[test]
    fn empty_str_is_empty_key() {
        assert_eq!(Key::<char>::key_len(""), 0);
        assert!(labels::<char, str>("").is_empty());
    }

    #[test]
    fn byte_strings_are_u8_keys() {
        assert_eq!(Key::<u8>::key_len(b"GET"), 3);
        assert_eq!(labels::<u8, [u8; 3]>(b"GET"), b"GET");
        assert_eq!(labels::<u8, [u8]>(&b"POST"[..]), b"POST");
    }

    #[test]
    fn references_delegate_to_the_key() {
        let owned = String::from("ab");
        let nested: &&String = &&owned;
        assert_eq!(Key::<char>::key_len(nested), 2);
        assert_eq!(labels(nested), ['a', 'b']);
        assert_eq!(labels(&vec![1u16, 2]), [1, 2]);
    }
}
