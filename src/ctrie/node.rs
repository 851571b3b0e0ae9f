use std::fmt;
use std::iter::Copied;
use std::slice;

use super::char_trait::TrieChar;
use super::key::Key;

/// Index of a node inside the node arena of its trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every trie.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of this node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One edge or marker within a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry<C: TrieChar> {
    /// An edge labelled with a character, leading to a child node owned by this edge.
    Edge(C, NodeId),
    /// The path consumed so far is itself a complete key.
    Leaf,
    /// Fallback slot reachable by no character path.
    Default,
}

impl<C: TrieChar> Entry<C> {
    /// True if this entry is an edge labelled `ch`.
    #[inline]
    pub fn matches(&self, ch: C) -> bool {
        matches!(*self, Entry::Edge(label, _) if label == ch)
    }

    /// True if this entry is a leaf marker.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf)
    }

    /// True if this entry is a default marker.
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Entry::Default)
    }
}

/// Slot count and reachable key lengths of a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Shape {
    pub(crate) size: usize,
    pub(crate) min_len: usize,
    pub(crate) max_len: usize,
}

impl Shape {
    /// Shape of a subtree holding no keys; it admits no query length at all.
    pub(crate) const EMPTY: Shape = Shape {
        size: 0,
        min_len: usize::MAX,
        max_len: 0,
    };

    /// Computes the shape of a node from its entries and the shapes of its children.
    pub(crate) fn of<C: TrieChar>(entries: &[Entry<C>], shapes: &[Shape]) -> Shape {
        entries.iter().fold(Shape::EMPTY, |shape, entry| match *entry {
            Entry::Edge(_, child) => {
                let child = shapes[child.index()];
                if child.size == 0 {
                    return shape;
                }
                Shape {
                    size: shape.size + child.size,
                    min_len: shape.min_len.min(child.min_len.saturating_add(1)),
                    max_len: shape.max_len.max(child.max_len.saturating_add(1)),
                }
            }
            Entry::Leaf => Shape {
                size: shape.size + 1,
                min_len: 0,
                max_len: shape.max_len,
            },
            Entry::Default => shape,
        })
    }

    #[inline]
    fn admits(&self, len: usize) -> bool {
        self.min_len <= len && len <= self.max_len
    }
}

/// A finalized node: its entries in slot order, with the slot offset of each entry.
#[derive(Clone, Debug)]
pub(crate) struct IndexNode<C: TrieChar> {
    entries: Box<[Entry<C>]>,
    offsets: Box<[usize]>,
    shape: Shape,
}

impl<C: TrieChar> IndexNode<C> {
    /// Freezes a node. `shapes` must already hold the shapes of all its children.
    pub(crate) fn freeze(entries: impl Into<Box<[Entry<C>]>>, shape: Shape, shapes: &[Shape]) -> Self {
        let entries = entries.into();
        let offsets = entries
            .iter()
            .scan(0, |offset, entry| {
                let current = *offset;
                *offset += match *entry {
                    Entry::Edge(_, child) => shapes[child.index()].size,
                    Entry::Leaf => 1,
                    Entry::Default => 0,
                };
                Some(current)
            })
            .collect();
        IndexNode {
            entries,
            offsets,
            shape,
        }
    }
}

/// A borrowed view of one node of a finalized trie.
///
/// All lookups on a `NodeRef` are relative to that node: slots are numbered
/// from 0 within its subtree and the "not found" sentinel is its [`size`](NodeRef::size).
#[derive(Clone, Copy)]
pub struct NodeRef<'t, C: TrieChar> {
    nodes: &'t [IndexNode<C>],
    id: NodeId,
}

impl<'t, C: TrieChar> NodeRef<'t, C> {
    pub(crate) fn new(nodes: &'t [IndexNode<C>], id: NodeId) -> Self {
        NodeRef { nodes, id }
    }

    #[inline]
    fn node(&self) -> &'t IndexNode<C> {
        &self.nodes[self.id.index()]
    }

    /// Arena index of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of keys stored in this subtree.
    #[inline]
    pub fn size(&self) -> usize {
        self.node().shape.size
    }

    /// Number of slots in this subtree, counting a default slot if this node holds one.
    pub fn capacity(&self) -> usize {
        self.size() + usize::from(self.has_default())
    }

    /// The "not found" sentinel of this node, equal to its size.
    pub fn end(&self) -> usize {
        self.size()
    }

    /// True if the path leading to this node is itself a key.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().entries.iter().any(Entry::is_leaf)
    }

    /// True if this node holds a default marker.
    pub fn has_default(&self) -> bool {
        self.node().entries.iter().any(Entry::is_default)
    }

    /// Shortest key length reachable from this node, or `None` if the subtree holds no keys.
    pub fn min_len(&self) -> Option<usize> {
        (self.size() > 0).then_some(self.node().shape.min_len)
    }

    /// Longest key length reachable from this node, or `None` if the subtree holds no keys.
    pub fn max_len(&self) -> Option<usize> {
        (self.size() > 0).then_some(self.node().shape.max_len)
    }

    /// Returns the node that `ch`'s edge leads to, or None if no such edge exists.
    #[inline]
    pub fn get(&self, ch: C) -> Option<NodeRef<'t, C>> {
        self.edge(ch).map(|(child, _)| child)
    }

    /// Returns an iterator over the entries of this node, in slot order.
    pub fn entries(&self) -> Copied<slice::Iter<'t, Entry<C>>> {
        self.node().entries.iter().copied()
    }

    /// Returns an iterator over the edges of this node, in slot order.
    pub fn children(&self) -> ChildIter<'t, C> {
        ChildIter {
            nodes: self.nodes,
            entries: self.node().entries.iter(),
        }
    }

    /// Resolves `key` to its slot within this subtree, or [`end`](NodeRef::end) if absent.
    pub fn find<K: Key<C> + ?Sized>(&self, key: &K) -> usize {
        self.resolve(key).unwrap_or_else(|| self.end())
    }

    /// Returns `true` if `key` is stored in this subtree.
    pub fn contains<K: Key<C> + ?Sized>(&self, key: &K) -> bool {
        self.accepts(key)
    }

    /// View of node `id` in the same arena as this node.
    pub(crate) fn at(&self, id: NodeId) -> NodeRef<'t, C> {
        NodeRef::new(self.nodes, id)
    }

    fn edge(&self, ch: C) -> Option<(NodeRef<'t, C>, usize)> {
        let node = self.node();
        let pos = node.entries.iter().position(|entry| entry.matches(ch))?;
        match node.entries[pos] {
            Entry::Edge(_, child) => Some((self.at(child), node.offsets[pos])),
            _ => None,
        }
    }

    fn leaf_offset(&self) -> Option<usize> {
        let node = self.node();
        let pos = node.entries.iter().position(Entry::is_leaf)?;
        Some(node.offsets[pos])
    }

    /// Single left-to-right descent. Edges are disjoint by character, so the first
    /// mismatch ends the search with no sibling to fall back to. `remaining`
    /// tracks how many labels are left, for pruning by reachable key length.
    pub(crate) fn resolve<K: Key<C> + ?Sized>(&self, key: &K) -> Option<usize> {
        let mut node = *self;
        let mut base = 0;
        let mut remaining = key.key_len();
        let mut chars = key.key_chars();
        loop {
            if !node.node().shape.admits(remaining) {
                return None;
            }
            match chars.next() {
                None => return node.leaf_offset().map(|offset| base + offset),
                Some(ch) => {
                    let (child, offset) = node.edge(ch)?;
                    base += offset;
                    node = child;
                    remaining = remaining.saturating_sub(1);
                }
            }
        }
    }

    pub(crate) fn accepts<K: Key<C> + ?Sized>(&self, key: &K) -> bool {
        self.node().shape.admits(key.key_len())
            && key
                .key_chars()
                .try_fold(*self, |node, ch| node.get(ch))
                .is_some_and(|node| node.is_leaf())
    }
}

impl<C: TrieChar> PartialEq for NodeRef<'_, C> {
    fn eq(&self, rhs: &Self) -> bool {
        std::ptr::eq(self.nodes, rhs.nodes) && self.id == rhs.id
    }
}

impl<C: TrieChar> Eq for NodeRef<'_, C> {}

impl<C: TrieChar> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("size", &self.size())
            .field("entries", &self.node().entries)
            .finish()
    }
}

/// An iterator over the edges of a node.
#[derive(Clone)]
pub struct ChildIter<'t, C: TrieChar> {
    nodes: &'t [IndexNode<C>],
    entries: slice::Iter<'t, Entry<C>>,
}

impl<'t, C: TrieChar> Iterator for ChildIter<'t, C> {
    type Item = (C, NodeRef<'t, C>);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        self.entries.find_map(|entry| match *entry {
            Entry::Edge(ch, child) => Some((ch, NodeRef::new(nodes, child))),
            _ => None,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entry_matches_only_its_own_edge() {
        let edge = Entry::Edge('a', NodeId::new(1));
        assert!(edge.matches('a'));
        assert!(!edge.matches('b'));
        assert!(!Entry::<char>::Leaf.matches('a'));
        assert!(!Entry::<char>::Default.matches('a'));
    }

    #[test]
    fn shape_of_empty_node_admits_nothing() {
        let shape = Shape::of::<char>(&[], &[]);
        assert_eq!(shape, Shape::EMPTY);
        assert!(!shape.admits(0));
        assert!(!shape.admits(3));
    }

    #[test]
    fn default_marker_adds_no_slot() {
        let shape = Shape::of::<char>(&[Entry::Default], &[]);
        assert_eq!(shape.size, 0);
        let shape = Shape::of::<char>(&[Entry::Leaf, Entry::Default], &[]);
        assert_eq!(shape.size, 1);
        assert!(shape.admits(0));
        assert!(!shape.admits(1));
    }

    #[test]
    fn shape_spans_child_lengths() {
        // node 1 is a leaf, node 2 has a leaf and an edge to node 1
        let mut shapes = vec![Shape::EMPTY; 3];
        shapes[1] = Shape::of::<char>(&[Entry::Leaf], &[]);
        let inner = Shape::of(&[Entry::Leaf, Entry::Edge('b', NodeId::new(1))], &shapes);
        shapes[2] = inner;
        let root = Shape::of(&[Entry::Edge('a', NodeId::new(2))], &shapes);
        assert_eq!(
            root,
            Shape {
                size: 2,
                min_len: 1,
                max_len: 2
            }
        );
    }

    #[test]
    fn offsets_follow_entry_order() {
        let mut shapes = vec![Shape::EMPTY; 3];
        shapes[1] = Shape::of::<char>(&[Entry::Leaf], &[]);
        shapes[2] = Shape {
            size: 3,
            min_len: 1,
            max_len: 3,
        };
        let entries = vec![
            Entry::Edge('x', NodeId::new(2)),
            Entry::Leaf,
            Entry::Edge('y', NodeId::new(1)),
            Entry::Default,
        ];
        let shape = Shape::of(&entries, &shapes);
        let node = IndexNode::freeze(entries, shape, &shapes);
        assert_eq!(&*node.offsets, &[0, 3, 4, 5]);
        assert_eq!(node.shape.size, 5);
    }
}
