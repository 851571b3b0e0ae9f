use std::fmt::Debug;

/// An edge label: one unit of a key.
///
/// Any `Copy + Eq + Debug` type qualifies, so `&str` keys walk `char` edges and
/// byte strings walk `u8` edges without wrapper types. Labels are only ever
/// compared for equality; a node never sorts or hashes its edges. `Debug` is
/// needed to report the offending key in [`BuildError`](super::BuildError).
pub trait TrieChar: Copy + Eq + Debug {}

impl<C> TrieChar for C where C: Copy + Eq + Debug {}
