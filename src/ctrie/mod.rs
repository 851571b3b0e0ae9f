/// Array map: values stored in trie slot order, plus its builder.
pub mod array_map;
/// Index trie builder and construction errors.
pub mod builder;
/// Trait for types that can serve as trie edge labels.
pub mod char_trait;
/// Finalized index trie.
pub mod index;
/// Borrowed keys for insertion and lookup.
pub mod key;
/// Trie entries, frozen nodes and borrowed node views.
pub mod node;

pub use array_map::{build_map, build_map_with_default, ArrayMap, MapBuilder};
pub use builder::{build_index, BuildError, IndexBuilder};
pub use char_trait::TrieChar;
pub use index::IndexTrie;
pub use key::Key;
pub use node::{ChildIter, Entry, NodeId, NodeRef};
