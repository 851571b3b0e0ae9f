use std::ops::{Index, IndexMut};
use std::slice;

use smallvec::SmallVec;

use super::builder::{build_index, BuildError, IndexBuilder};
use super::char_trait::TrieChar;
use super::index::IndexTrie;
use super::key::Key;

/// Stored copy of one inserted key. Keys of up to 32 labels stay inline.
type KeyBuf<C> = SmallVec<[C; 32]>;

/// A builder collecting key/value pairs for an [`ArrayMap`].
///
/// Keys are inserted into an [`IndexBuilder`] as they arrive; values are held
/// in declaration order until [`build`](MapBuilder::build) knows the final
/// slot of every key.
#[derive(Clone, Debug)]
pub struct MapBuilder<T, C: TrieChar = char> {
    index: IndexBuilder<C>,
    keys: Vec<KeyBuf<C>>,
    values: Vec<T>,
    default: Option<T>,
}

impl<T, C: TrieChar> Default for MapBuilder<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: TrieChar> MapBuilder<T, C> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        MapBuilder {
            index: IndexBuilder::new(),
            keys: Vec::new(),
            values: Vec::new(),
            default: None,
        }
    }

    /// Number of keys inserted so far.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True if a default value has been set.
    pub fn has_default(&self) -> bool {
        self.index.has_default()
    }

    /// Inserts a key and its value.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateKey` if the key was already inserted; the
    /// rejected value is dropped and the builder is otherwise unchanged.
    pub fn insert<K: Key<C> + ?Sized>(&mut self, key: &K, value: T) -> Result<(), BuildError<C>> {
        self.index.insert(key)?;
        self.keys.push(key.key_chars().collect());
        self.values.push(value);
        Ok(())
    }

    /// Sets the value returned for keys that are not in the map.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateDefault` if a default was already set.
    pub fn insert_default(&mut self, value: T) -> Result<(), BuildError<C>> {
        self.index.insert_default()?;
        self.default = Some(value);
        Ok(())
    }

    /// Finalizes the trie and moves every value into the slot its key resolves to.
    pub fn build(self) -> ArrayMap<T, C> {
        let MapBuilder {
            index,
            keys,
            values,
            default,
        } = self;
        let index = index.build();

        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None)
            .take(index.capacity())
            .collect();
        for (key, value) in keys.iter().zip(values) {
            let slot = index
                .resolve(key.as_slice())
                .expect("every inserted key resolves to a slot");
            debug_assert!(slots[slot].is_none(), "two keys resolved to slot {slot}");
            slots[slot] = Some(value);
        }
        if let Some(default) = default {
            slots[index.size()] = Some(default);
        }

        let values: Box<[T]> = slots
            .into_iter()
            .map(|value| value.expect("every slot is assigned exactly once"))
            .collect();
        log::debug!(
            "assembled array map: {} slots, default: {}",
            values.len(),
            index.has_default()
        );
        ArrayMap { index, values }
    }
}

/// A map from a fixed key set to values stored in one array.
///
/// Slots `0..size()` hold the values of the keys, in the order the index trie
/// assigns; slot `size()` holds the default when there is one. Lookups walk the
/// trie once, character by character, and never hash. Values can be edited in
/// place; the key set cannot change after construction.
///
/// # Examples
///
/// ```
/// use libctrie::array_map;
///
/// let map = array_map! {
///     "A" => 0xA,
///     "AB" => 0xAB,
///     "BA" => 0xBA,
///     "AA" => 0xAA,
///     default => 0xBEEF,
/// }
/// .unwrap();
///
/// assert_eq!(map.size(), 4);
/// assert_eq!(map.capacity(), 5);
/// assert_eq!(map["AB"], 0xAB);
/// assert_eq!(map["AC"], 0xBEEF);
/// assert_eq!(map.find("AC"), None);
/// assert!(!map.contains("AC"));
/// ```
#[derive(Clone, Debug)]
pub struct ArrayMap<T, C: TrieChar = char> {
    index: IndexTrie<C>,
    values: Box<[T]>,
}

impl<T: Default, C: TrieChar> ArrayMap<T, C> {
    /// Creates a map over an already built index with every slot, default
    /// included, holding `T::default()`.
    ///
    /// ```
    /// use libctrie::ctrie::{ArrayMap, IndexBuilder};
    ///
    /// let mut builder = IndexBuilder::new();
    /// builder.insert("GET").unwrap();
    /// builder.insert_default().unwrap();
    /// let mut hits: ArrayMap<u32> = ArrayMap::from_index(builder.build());
    ///
    /// *hits.get_or_default_mut("POST").unwrap() += 1;
    /// assert_eq!(hits["GET"], 0);
    /// assert_eq!(hits.get_default(), Some(&1));
    /// ```
    pub fn from_index(index: IndexTrie<C>) -> Self {
        let values = std::iter::repeat_with(T::default)
            .take(index.capacity())
            .collect();
        ArrayMap { index, values }
    }

    /// Builds a map over `keys` with every value set to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateKey` on the first key that repeats.
    ///
    /// ```
    /// use libctrie::ctrie::ArrayMap;
    ///
    /// let mut counts: ArrayMap<usize> = ArrayMap::from_keys(["fn", "let", "if"]).unwrap();
    /// for word in "let x = if y { fn_call() } else { 0 }; let z".split_whitespace() {
    ///     if let Some(count) = counts.find_mut(word) {
    ///         *count += 1;
    ///     }
    /// }
    /// assert_eq!(counts["let"], 2);
    /// assert_eq!(counts["fn"], 0);
    /// ```
    pub fn from_keys<K: Key<C>>(keys: impl IntoIterator<Item = K>) -> Result<Self, BuildError<C>> {
        build_index(keys).map(Self::from_index)
    }
}

impl<T, C: TrieChar> ArrayMap<T, C> {
    /// The index trie that assigns slots to keys.
    pub fn trie(&self) -> &IndexTrie<C> {
        &self.index
    }

    /// Number of keys, not counting the default.
    pub fn size(&self) -> usize {
        self.index.size()
    }

    /// Alias for [`size`](ArrayMap::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Number of slots, counting the default.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// True if the map holds no keys. A map with only a default is empty.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The position [`index_of`](ArrayMap::index_of) returns for absent keys.
    pub fn end(&self) -> usize {
        self.size()
    }

    /// Returns `true` if `key` is in the map.
    pub fn contains<K: Key<C> + ?Sized>(&self, key: &K) -> bool {
        self.index.accepts(key)
    }

    /// Position of `key`'s value, or [`end`](ArrayMap::end) if the key is absent.
    pub fn index_of<K: Key<C> + ?Sized>(&self, key: &K) -> usize {
        self.index.find(key)
    }

    /// Returns the value stored for `key`, or `None` if the key is absent.
    pub fn find<K: Key<C> + ?Sized>(&self, key: &K) -> Option<&T> {
        self.index.resolve(key).map(|slot| &self.values[slot])
    }

    /// Mutable version of [`find`](ArrayMap::find).
    pub fn find_mut<K: Key<C> + ?Sized>(&mut self, key: &K) -> Option<&mut T> {
        self.index.resolve(key).map(|slot| &mut self.values[slot])
    }

    /// Returns the value stored for `key`, falling back to the default for absent keys.
    ///
    /// Returns `None` only if the key is absent and the map has no default.
    pub fn get_or_default<K: Key<C> + ?Sized>(&self, key: &K) -> Option<&T> {
        let slot = self.index.resolve(key).or_else(|| self.index.default_slot())?;
        Some(&self.values[slot])
    }

    /// Mutable version of [`get_or_default`](ArrayMap::get_or_default).
    pub fn get_or_default_mut<K: Key<C> + ?Sized>(&mut self, key: &K) -> Option<&mut T> {
        let slot = self.index.resolve(key).or_else(|| self.index.default_slot())?;
        Some(&mut self.values[slot])
    }

    /// Returns the value at `pos`, which may be the default slot.
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// Mutable version of [`get`](ArrayMap::get).
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.values.get_mut(pos)
    }

    /// True if the map has a default value.
    pub fn has_default(&self) -> bool {
        self.index.has_default()
    }

    /// The default value, if there is one.
    pub fn get_default(&self) -> Option<&T> {
        self.index.default_slot().map(|slot| &self.values[slot])
    }

    /// Mutable version of [`get_default`](ArrayMap::get_default).
    pub fn get_default_mut(&mut self) -> Option<&mut T> {
        self.index.default_slot().map(|slot| &mut self.values[slot])
    }

    /// The values of the keys in slot order, without the default.
    pub fn as_slice(&self) -> &[T] {
        &self.values[..self.size()]
    }

    /// Mutable version of [`as_slice`](ArrayMap::as_slice). The default stays out of reach.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let size = self.size();
        &mut self.values[..size]
    }

    /// Returns an iterator over the values of the keys in slot order, without the default.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the values of the keys in slot order, without the default.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns an iterator over `(key, value)` pairs in slot order, without the default.
    pub fn entries(&self) -> impl Iterator<Item = (Vec<C>, &T)> + '_ {
        self.index.keys().into_iter().zip(self.iter())
    }
}

impl<'a, T, C: TrieChar> IntoIterator for &'a ArrayMap<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, C: TrieChar> IntoIterator for &'a mut ArrayMap<T, C> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Positional access over `0..capacity()`, default slot included.
///
/// # Panics
///
/// Panics if `pos >= capacity()`.
impl<T, C: TrieChar> Index<usize> for ArrayMap<T, C> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        &self.values[pos]
    }
}

impl<T, C: TrieChar> IndexMut<usize> for ArrayMap<T, C> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        &mut self.values[pos]
    }
}

/// Unchecked lookup by key, equivalent to [`ArrayMap::get_or_default`].
///
/// # Panics
///
/// Panics if the key is absent and the map has no default.
impl<T> Index<&str> for ArrayMap<T, char> {
    type Output = T;

    fn index(&self, key: &str) -> &T {
        match self.get_or_default(key) {
            Some(value) => value,
            None => panic!("key {key:?} not in map and map has no default"),
        }
    }
}

impl<T> IndexMut<&str> for ArrayMap<T, char> {
    fn index_mut(&mut self, key: &str) -> &mut T {
        match self.get_or_default_mut(key) {
            Some(value) => value,
            None => panic!("key {key:?} not in map and map has no default"),
        }
    }
}

/// Unchecked lookup by key, equivalent to [`ArrayMap::get_or_default`].
///
/// # Panics
///
/// Panics if the key is absent and the map has no default.
impl<T, C: TrieChar> Index<&[C]> for ArrayMap<T, C> {
    type Output = T;

    fn index(&self, key: &[C]) -> &T {
        match self.get_or_default(key) {
            Some(value) => value,
            None => panic!("key {key:?} not in map and map has no default"),
        }
    }
}

impl<T, C: TrieChar> IndexMut<&[C]> for ArrayMap<T, C> {
    fn index_mut(&mut self, key: &[C]) -> &mut T {
        match self.get_or_default_mut(key) {
            Some(value) => value,
            None => panic!("key {key:?} not in map and map has no default"),
        }
    }
}

/// Builds an array map from an iterator of key/value pairs.
///
/// # Examples
///
/// ```
/// use libctrie::ctrie::build_map;
///
/// let map = build_map([("-v", 1), ("--verbose", 1), ("-q", 2)]).unwrap();
/// assert_eq!(map.find("--verbose"), Some(&1));
/// assert_eq!(map.find("--quiet"), None);
/// ```
pub fn build_map<T, C, K>(pairs: impl IntoIterator<Item = (K, T)>) -> Result<ArrayMap<T, C>, BuildError<C>>
where
    C: TrieChar,
    K: Key<C>,
{
    let mut builder = MapBuilder::new();
    for (key, value) in pairs {
        builder.insert(&key, value)?;
    }
    Ok(builder.build())
}

/// Builds an array map from an iterator of key/value pairs and a default value.
///
/// # Examples
///
/// ```
/// use libctrie::ctrie::build_map_with_default;
///
/// let map = build_map_with_default([("GET", 1), ("PUT", 2)], 0).unwrap();
/// assert_eq!(map["PUT"], 2);
/// assert_eq!(map["PATCH"], 0);
/// ```
pub fn build_map_with_default<T, C, K>(
    pairs: impl IntoIterator<Item = (K, T)>,
    default: T,
) -> Result<ArrayMap<T, C>, BuildError<C>>
where
    C: TrieChar,
    K: Key<C>,
{
    let mut builder = MapBuilder::new();
    for (key, value) in pairs {
        builder.insert(&key, value)?;
    }
    builder.insert_default(default)?;
    Ok(builder.build())
}
