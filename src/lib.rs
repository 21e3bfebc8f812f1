//! A path compressed prefix tree (radix tree, PATRICIA trie) mapping string keys to values.
//!
//! Keys are split into labels at code point boundaries. Inserting a key that partially
//! overlaps an existing label splits the node, removing a key merges nodes that no longer
//! branch, so the tree always stays minimal.
#[cfg(test)]
#[macro_use]
extern crate maplit;

#[cfg(test)]
mod obey;

mod error;
pub mod radix_tree;

pub use error::ValidationError;
pub use radix_tree::{common_prefix, Dump, Iter, IterKey, Node, RadixTree, Values};
