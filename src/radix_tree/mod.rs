use smallvec::SmallVec;
use sorted_iter::sorted_pair_iterator::SortedByKey;
use std::{
    borrow::Borrow,
    collections::btree_map,
    fmt::{self, Debug, Display},
    ops::Deref,
    sync::Arc,
};

mod node;
#[cfg(feature = "rayon")]
mod parallel;
#[allow(clippy::module_inception)]
mod radix_tree;

pub use node::Node;
pub use radix_tree::*;

/// inline capacity of a label, in bytes
pub const INLINE_LABEL: usize = 16;

/// A path fragment
///
/// Always valid utf-8, since it is only ever built from `str` slices that are cut at char boundaries.
#[derive(Clone, PartialEq, Eq, Default)]
pub(crate) struct Fragment(SmallVec<[u8; INLINE_LABEL]>);

impl Fragment {
    pub(crate) fn as_str(&self) -> &str {
        // SAFETY: see the type level invariant. All constructors take a `&str`.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// the leading symbol of the fragment, none for the root
    pub(crate) fn first(&self) -> Option<char> {
        first_symbol(self.as_str())
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.0.extend_from_slice(text.as_bytes())
    }
}

impl Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Fragment {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Fragment {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<'a> From<&'a str> for Fragment {
    fn from(value: &'a str) -> Self {
        Self(value.as_bytes().into())
    }
}

/// Longest common prefix of two strings, and its length in bytes.
///
/// Strings are compared code point by code point, so a multi byte character is either matched
/// as a whole or not at all, and the prefix is always valid utf-8.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> (&'a str, usize) {
    let n = a
        .chars()
        .zip(b.chars())
        .take_while(|(a, b)| a == b)
        .map(|(c, _)| c.len_utf8())
        .sum();
    (&a[..n], n)
}

fn first_symbol(text: &str) -> Option<char> {
    text.chars().next()
}

pub(crate) enum FindResult<'a, V> {
    // Found an exact match
    Found(&'a Node<V>),
    // found a tree for which the path is a prefix, with rt bytes remaining in the label of the tree
    Prefix {
        // a tree of which the searched path is a prefix
        tree: &'a Node<V>,
        // number of remaining bytes in the label of the tree
        rt: usize,
    },
    // no tree covers the path
    NotFound,
}

/// find a prefix in a tree. Will either return
/// - Found(tree) if we found the tree exactly,
/// - Prefix if we found a tree of which prefix is a prefix
/// - NotFound if there is no tree
pub(crate) fn find<'a, V>(tree: &'a Node<V>, prefix: &str) -> FindResult<'a, V> {
    let (_, n) = common_prefix(tree.label(), prefix);
    // remaining in prefix
    let rp = prefix.len() - n;
    // remaining in tree label
    let rt = tree.label().len() - n;
    if rp == 0 && rt == 0 {
        // direct hit
        FindResult::Found(tree)
    } else if rp == 0 {
        // tree is a subtree of prefix
        FindResult::Prefix { tree, rt }
    } else if rt == 0 {
        // prefix is a subtree of tree. At most one child can match the next symbol.
        let rest = &prefix[n..];
        match first_symbol(rest).and_then(|c| tree.child(c)) {
            Some(child) => find(child, rest),
            None => FindResult::NotFound,
        }
    } else {
        // disjoint
        FindResult::NotFound
    }
}

/// Key for iteration
///
/// Cloning is cheap. The buffer is only copied when the iterator advances while a clone is alive.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IterKey(Arc<String>);

impl IterKey {
    fn new(root: &str) -> Self {
        Self(Arc::new(root.to_owned()))
    }

    fn append(&mut self, data: &str) {
        Arc::make_mut(&mut self.0).push_str(data);
    }

    fn pop(&mut self, n: usize) {
        let elems = Arc::make_mut(&mut self.0);
        elems.truncate(elems.len().saturating_sub(n));
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for IterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl Display for IterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for IterKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for IterKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for IterKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl From<IterKey> for String {
    fn from(value: IterKey) -> Self {
        Arc::try_unwrap(value.0).unwrap_or_else(|shared| shared.as_ref().clone())
    }
}

type Children<'a, V> = btree_map::Values<'a, char, Node<V>>;

/// Iterator over all values of a tree, in key order
pub struct Values<'a, V> {
    // None until the value of the node has been visited
    stack: Vec<(&'a Node<V>, Option<Children<'a, V>>)>,
}

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(tree: &'a Node<V>) -> Self {
        Self {
            stack: vec![(tree, None)],
        }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((tree, children)) = self.stack.last_mut() {
            let tree: &'a Node<V> = *tree;
            match children {
                None => {
                    *children = Some(tree.children.values());
                    if let Some(value) = tree.value() {
                        return Some(value);
                    }
                }
                Some(iter) => {
                    if let Some(child) = iter.next() {
                        self.stack.push((child, None));
                    } else {
                        self.stack.pop();
                    }
                }
            }
        }
        None
    }
}

/// Iterator over all key value pairs of a tree, in key order
pub struct Iter<'a, V> {
    path: IterKey,
    stack: Vec<(&'a Node<V>, Option<Children<'a, V>>)>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn empty() -> Self {
        Self {
            stack: Vec::new(),
            path: IterKey::default(),
        }
    }

    pub(crate) fn new(tree: &'a Node<V>, prefix: IterKey) -> Self {
        Self {
            stack: vec![(tree, None)],
            path: prefix,
        }
    }
}

impl<'a, V> SortedByKey for Iter<'a, V> {}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (IterKey, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((tree, children)) = self.stack.last_mut() {
            let tree: &'a Node<V> = *tree;
            match children {
                None => {
                    *children = Some(tree.children.values());
                    if let Some(value) = tree.value() {
                        return Some((self.path.clone(), value));
                    }
                }
                Some(iter) => {
                    if let Some(child) = iter.next() {
                        self.path.append(child.label());
                        self.stack.push((child, None));
                    } else {
                        self.path.pop(tree.label().len());
                        self.stack.pop();
                    }
                }
            }
        }
        None
    }
}
