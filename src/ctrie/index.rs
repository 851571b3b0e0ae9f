use super::char_trait::TrieChar;
use super::key::Key;
use super::node::{Entry, IndexNode, NodeId, NodeRef};

/// A finalized index trie: the shape of a key set, without any values.
///
/// Produced by [`IndexBuilder::build`](super::builder::IndexBuilder::build) or
/// [`build_index`](super::builder::build_index). Every key resolves to a slot in
/// `0..size()`; the "not found" sentinel is [`end`](IndexTrie::end), equal to
/// `size()`. If a default was inserted it occupies slot `size()`, the last slot
/// of `capacity()`.
///
/// # Examples
///
/// ```
/// use libctrie::ctrie::build_index;
///
/// let index = build_index(["A", "B", "AB", "AA", "CD"]).unwrap();
/// assert_eq!(index.size(), 5);
/// assert!(index.contains("AA"));
/// assert!(!index.contains("AAA"));
/// assert_eq!(index.find("C"), index.end());
/// ```
#[derive(Clone, Debug)]
pub struct IndexTrie<C: TrieChar = char> {
    nodes: Box<[IndexNode<C>]>,
}

impl<C: TrieChar> IndexTrie<C> {
    /// Wraps an arena of frozen nodes. The arena must hold at least the root.
    pub(crate) fn from_nodes(nodes: Box<[IndexNode<C>]>) -> Self {
        debug_assert!(!nodes.is_empty(), "index trie without a root node");
        IndexTrie { nodes }
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> NodeRef<'_, C> {
        NodeRef::new(&self.nodes, NodeId::ROOT)
    }

    /// Returns the node with the given id, if it belongs to this trie.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, C>> {
        (id.index() < self.nodes.len()).then(|| NodeRef::new(&self.nodes, id))
    }

    /// Returns the number of nodes in the arena, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of keys in the trie.
    pub fn size(&self) -> usize {
        self.root().size()
    }

    /// Number of slots, counting the default slot if there is one.
    pub fn capacity(&self) -> usize {
        self.root().capacity()
    }

    /// True if the trie holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// True if a default was inserted.
    pub fn has_default(&self) -> bool {
        self.root().has_default()
    }

    /// The "not found" sentinel returned by [`find`](IndexTrie::find).
    pub fn end(&self) -> usize {
        self.size()
    }

    /// Slot of the default, if there is one.
    pub fn default_slot(&self) -> Option<usize> {
        self.has_default().then(|| self.size())
    }

    /// Resolves `key` to its slot, or [`end`](IndexTrie::end) if it is not a key.
    pub fn find<K: Key<C> + ?Sized>(&self, key: &K) -> usize {
        self.root().find(key)
    }

    /// Resolves `key` to its slot, or `None` if it is not a key.
    pub fn slot<K: Key<C> + ?Sized>(&self, key: &K) -> Option<usize> {
        self.resolve(key)
    }

    /// Returns `true` if `key` is one of the inserted keys.
    pub fn contains<K: Key<C> + ?Sized>(&self, key: &K) -> bool {
        self.root().contains(key)
    }

    /// Returns every key in slot order.
    pub fn keys(&self) -> Vec<Vec<C>> {
        let mut keys = Vec::with_capacity(self.size());
        let mut prefix = Vec::new();
        Self::collect_keys(self.root(), &mut prefix, &mut keys);
        keys
    }

    fn collect_keys(node: NodeRef<'_, C>, prefix: &mut Vec<C>, keys: &mut Vec<Vec<C>>) {
        for entry in node.entries() {
            match entry {
                Entry::Leaf => keys.push(prefix.clone()),
                Entry::Edge(ch, child) => {
                    prefix.push(ch);
                    Self::collect_keys(node.at(child), prefix, keys);
                    prefix.pop();
                }
                Entry::Default => {}
            }
        }
    }

    pub(crate) fn resolve<K: Key<C> + ?Sized>(&self, key: &K) -> Option<usize> {
        self.root().resolve(key)
    }

    pub(crate) fn accepts<K: Key<C> + ?Sized>(&self, key: &K) -> bool {
        self.root().accepts(key)
    }
}

#[cfg(test)]
mod test {
    use crate::ctrie::{build_index, NodeId};

    #[test]
    fn keys_in_slot_order() {
        let index = build_index(["A", "AB", "BA", "AA", "", "ABC"]).unwrap();
        let keys: Vec<String> = index
            .keys()
            .into_iter()
            .map(|key| key.into_iter().collect())
            .collect();
        assert_eq!(keys.len(), index.size());
        for (slot, key) in keys.iter().enumerate() {
            assert_eq!(index.find(key), slot, "{key:?}");
        }
        assert_eq!(keys, ["BA", "", "A", "AA", "AB", "ABC"]);
    }

    #[test]
    fn keys_of_nested_edges() {
        let index = build_index(["TEST", "TESTER", "WTEST"]).unwrap();
        assert_eq!(
            index.keys(),
            [
                "TEST".chars().collect::<Vec<_>>(),
                "TESTER".chars().collect(),
                "WTEST".chars().collect(),
            ]
        );
    }

    #[test]
    fn long_keys_resolve() {
        let keys: Vec<Vec<u8>> = (1..=3u8).map(|n| vec![n; 64]).collect();
        let index = build_index(&keys).unwrap();
        for key in &keys {
            assert!(index.contains(key));
            assert_eq!(index.slot(key), Some(index.find(key)));
        }
        assert_eq!(index.slot(&[1u8; 63]), None);
        assert!(!index.contains(&[2u8; 65]));
        assert_eq!(index.root().min_len(), Some(64));
    }

    #[test]
    fn node_lookup_by_id() {
        let index = build_index(["AB"]).unwrap();
        assert_eq!(index.node_count(), 3);
        let child = index.root().get('A').unwrap();
        assert_eq!(index.node(child.id()), Some(child));
        assert_eq!(index.node(NodeId::new(3)), None);
    }
}
