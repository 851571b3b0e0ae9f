use std::error::Error;

use smallvec::SmallVec;

use super::char_trait::TrieChar;
use super::index::IndexTrie;
use super::key::Key;
use super::node::{Entry, IndexNode, NodeId, Shape};

/// A node under construction.
#[derive(Clone, Debug)]
struct BuildNode<C: TrieChar> {
    entries: SmallVec<[Entry<C>; 4]>,
}

impl<C: TrieChar> BuildNode<C> {
    fn new() -> Self {
        BuildNode {
            entries: SmallVec::new(),
        }
    }

    fn is_leaf(&self) -> bool {
        self.entries.iter().any(Entry::is_leaf)
    }

    fn has_default(&self) -> bool {
        self.entries.iter().any(Entry::is_default)
    }

    fn child(&self, ch: C) -> Option<NodeId> {
        self.entries.iter().find_map(|entry| match *entry {
            Entry::Edge(label, child) if label == ch => Some(child),
            _ => None,
        })
    }
}

/// A builder for index tries.
///
/// Keys may be inserted in any order. Every insertion moves the entries it
/// touches to the end of their node: the new or extended edge goes after all
/// other entries of its node, and a new leaf goes last in the node where the
/// key ends. Slots are numbered by walking entries in that order, so a key's
/// slot is only known once [`build`](IndexBuilder::build) has run.
#[derive(Clone, Debug)]
pub struct IndexBuilder<C: TrieChar = char> {
    // Children are always pushed after their parent, so every edge points to a higher id.
    nodes: Vec<BuildNode<C>>,
    keys: usize,
}

impl<C: TrieChar> Default for IndexBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: TrieChar> IndexBuilder<C> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        IndexBuilder {
            nodes: vec![BuildNode::new()],
            keys: 0,
        }
    }

    /// Number of keys inserted so far.
    pub fn len(&self) -> usize {
        self.keys
    }

    /// True if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.keys == 0
    }

    /// True if a default has been inserted.
    pub fn has_default(&self) -> bool {
        self.nodes[NodeId::ROOT.index()].has_default()
    }

    /// Inserts a key.
    ///
    /// The key can be anything that implements [`Key`]: `str`, `String`,
    /// `[u8]`, `Vec<u8>`, fixed-size arrays like `[u8; 3]`, or a reference to
    /// one of those. The empty key is a valid key.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateKey` if the key was already inserted. The
    /// builder is left unchanged in that case.
    pub fn insert<K: Key<C> + ?Sized>(&mut self, key: &K) -> Result<(), BuildError<C>> {
        if self.terminal(key).is_some_and(|id| self.nodes[id.index()].is_leaf()) {
            return Err(BuildError::DuplicateKey(key.key_chars().collect()));
        }
        let terminal = key
            .key_chars()
            .fold(NodeId::ROOT, |node, ch| self.descend_or_grow(node, ch));
        self.nodes[terminal.index()].entries.push(Entry::Leaf);
        self.keys += 1;
        log::trace!(
            "inserted key of length {} ending at node {}",
            key.key_len(),
            terminal.index()
        );
        Ok(())
    }

    /// Inserts the default marker at the root.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateDefault` if a default was already inserted.
    pub fn insert_default(&mut self) -> Result<(), BuildError<C>> {
        let root = &mut self.nodes[NodeId::ROOT.index()];
        if root.has_default() {
            return Err(BuildError::DuplicateDefault);
        }
        log::trace!("inserting default");
        root.entries.push(Entry::Default);
        Ok(())
    }

    /// Follows `key` through the existing edges and returns the node it ends at.
    fn terminal<K: Key<C> + ?Sized>(&self, key: &K) -> Option<NodeId> {
        key.key_chars()
            .try_fold(NodeId::ROOT, |node, ch| self.nodes[node.index()].child(ch))
    }

    /// Moves the edge for `ch` to the end of `node`, creating it if needed, and
    /// returns the child it leads to.
    fn descend_or_grow(&mut self, node: NodeId, ch: C) -> NodeId {
        let fresh = NodeId::new(self.nodes.len());
        let entries = &mut self.nodes[node.index()].entries;
        let existing = entries.iter().enumerate().find_map(|(pos, entry)| match *entry {
            Entry::Edge(label, child) if label == ch => Some((pos, child)),
            _ => None,
        });
        match existing {
            Some((pos, child)) => {
                let entry = entries.remove(pos);
                entries.push(entry);
                child
            }
            None => {
                entries.push(Entry::Edge(ch, fresh));
                self.nodes.push(BuildNode::new());
                fresh
            }
        }
    }

    /// Finalizes the trie, computing slot offsets and reachable key lengths for every node.
    pub fn build(self) -> IndexTrie<C> {
        let count = self.nodes.len();
        let mut shapes = vec![Shape::EMPTY; count];
        for id in (0..count).rev() {
            let shape = Shape::of(&self.nodes[id].entries, &shapes);
            shapes[id] = shape;
        }
        let nodes: Box<[IndexNode<C>]> = self
            .nodes
            .into_iter()
            .zip(&shapes)
            .map(|(node, &shape)| IndexNode::freeze(node.entries.into_vec(), shape, &shapes))
            .collect();
        let trie = IndexTrie::from_nodes(nodes);
        log::debug!(
            "built index trie: {} keys, {} nodes, default: {}",
            trie.size(),
            trie.node_count(),
            trie.has_default()
        );
        trie
    }
}

/// Errors that can occur when building an index trie or an array map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError<C: TrieChar> {
    /// The same key was inserted twice.
    DuplicateKey(Vec<C>),
    /// A default was inserted twice.
    DuplicateDefault,
}

impl<C: TrieChar> std::fmt::Display for BuildError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::DuplicateKey(key) => write!(f, "DuplicateKey - {key:?} was inserted twice"),
            BuildError::DuplicateDefault => write!(f, "DuplicateDefault - default was inserted twice"),
        }
    }
}

impl<C: TrieChar> Error for BuildError<C> {}

/// Builds an index trie from an iterator of keys.
///
/// Each key must implement [`Key`], so the iterator may yield `&str`,
/// `String`, slices, vectors, arrays, or references to any of them.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libctrie::ctrie::build_index;
///
/// let index = build_index(["GET", "PUT", "POST"]).unwrap();
/// assert!(index.contains("POST"));
/// assert!(!index.contains("PATCH"));
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libctrie::ctrie::build_index;
///
/// let keys: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2], vec![2]];
/// let index = build_index(keys).unwrap();
/// assert!(index.contains(&[1u8, 2]));
/// assert_eq!(index.find(&[1u8, 2, 4]), index.end());
/// ```
pub fn build_index<C, K>(keys: impl IntoIterator<Item = K>) -> Result<IndexTrie<C>, BuildError<C>>
where
    C: TrieChar,
    K: Key<C>,
{
    let mut builder = IndexBuilder::new();
    for key in keys {
        builder.insert(&key)?;
    }
    Ok(builder.build())
}
