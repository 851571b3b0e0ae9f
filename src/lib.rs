//! # libctrie
//!
//! Array-backed lookup tables over a fixed, fully known key set.
//!
//! The keys are folded into a character trie once, up front. Every key is then
//! assigned a slot, and the values are laid out in one array in slot order.
//! A lookup is a single left-to-right walk of the query: at most one edge can
//! match each character, so there is no hashing and no backtracking, and a
//! query that is too short or too long for the key set is rejected before any
//! character is compared.
//!
//! Typical uses are keyword recognizers, dispatch tables, protocol tag
//! decoders and command-line flag tables.
//!
//! ## Features
//!
//! - **Generic over character type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`TrieChar`](ctrie::TrieChar)
//! - **Compact**: values live in one boxed slice, trie nodes in one arena
//! - **Fast**: O(key length) lookups
//! - **Thread-safe**: a built [`ArrayMap`](ctrie::ArrayMap) has no interior mutability and is `Send + Sync`
//!
//! ## Quick Start
//!
//! ```
//! use libctrie::array_map;
//!
//! let map = array_map! {
//!     "AA" => 0xAA,
//!     "BA" => 0xBA,
//!     "A" => 0xA,
//!     "AB" => 0xAB,
//!     default => 0xBEEF,
//! }
//! .unwrap();
//!
//! assert_eq!(map.find("AB"), Some(&0xAB));
//! assert_eq!(map.find("AC"), None);
//! assert_eq!(map["AC"], 0xBEEF);
//! ```
//!
//! Without the macro, use [`MapBuilder`](ctrie::MapBuilder) or
//! [`build_map`](ctrie::build_map):
//!
//! ```
//! use libctrie::ctrie::MapBuilder;
//!
//! let mut builder = MapBuilder::new();
//! builder.insert("GET", 1).unwrap();
//! builder.insert("POST", 2).unwrap();
//! assert!(builder.insert("GET", 3).is_err());
//! let map = builder.build();
//!
//! assert_eq!(map.size(), 2);
//! assert!(map.contains("POST"));
//! ```
//!
//! ## Slot order
//!
//! Slots are numbered by walking the trie's entries in order. Each insertion
//! moves the entries it touches to the end of their node, so the slot order is
//! generally not the declaration order. Use [`ArrayMap::index_of`](ctrie::ArrayMap::index_of)
//! to learn where a key landed.

#![warn(missing_docs)]

#[macro_use]
mod macros;

/// Index trie, array map and their builders.
pub mod ctrie;

#[cfg(test)]
mod proptests;
