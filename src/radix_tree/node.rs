use super::{first_symbol, Fragment, Values};
use std::collections::{btree_map::Entry, BTreeMap};
use tracing::trace;

/// A single node of a [RadixTree](super::RadixTree).
///
/// The label is the part of the key on the edge into this node. A node without a value is a
/// joint node that only exists to branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<V> {
    pub(crate) label: Fragment,
    pub(crate) value: Option<V>,
    pub(crate) children: BTreeMap<char, Node<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            label: Fragment::default(),
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<V> Node<V> {
    fn new(label: Fragment, value: Option<V>, children: BTreeMap<char, Self>) -> Self {
        Self {
            label,
            value,
            children,
        }
    }

    fn single(key: &str, value: V) -> Self {
        Self::new(key.into(), Some(value), BTreeMap::new())
    }

    /// The label of the edge into this node
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Direct children, ordered by their leading symbol
    pub fn children(&self) -> impl Iterator<Item = &Self> + '_ {
        self.children.values()
    }

    /// The child whose label starts with `symbol`, if any
    pub fn child(&self, symbol: char) -> Option<&Self> {
        self.children.get(&symbol)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// true if the node has neither a value nor children
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Number of values in the subtree rooted at this node, including its own.
    ///
    /// This walks the entire subtree.
    pub fn len(&self) -> usize {
        usize::from(self.value.is_some()) + self.children.values().map(Self::len).sum::<usize>()
    }

    /// All values in the subtree rooted at this node, in key order
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self)
    }

    /// create an artificial split at offset n
    ///
    /// afterwards this node is a joint node with the first n bytes of the label, and the old
    /// content of the node is its only child. n must be a char boundary inside the label.
    pub(crate) fn split(&mut self, n: usize) {
        debug_assert!(n > 0 && n < self.label.len());
        trace!(label = %self.label, at = n, "split");
        let first = self.label()[..n].into();
        let rest = self.label()[n..].into();
        let mut child = std::mem::replace(self, Self::new(first, None, BTreeMap::new()));
        child.label = rest;
        if let Some(symbol) = child.label.first() {
            self.children.insert(symbol, child);
        }
    }

    /// removes degenerate node again
    ///
    /// a node with a single child and no own value is merged with its child. The position
    /// of the node in its parent does not change, since the label keeps its leading symbol.
    pub(crate) fn unsplit(&mut self) {
        if self.value.is_some() || self.children.len() != 1 {
            return;
        }
        if let Some((_, child)) = self.children.pop_first() {
            trace!(label = %self.label, absorbed = %child.label, "merge");
            let Node {
                label,
                value,
                children,
            } = child;
            self.label.push_str(&label);
            self.value = value;
            self.children = children;
        }
    }

    /// insert `value` at `key`, relative to the end of the label of this node.
    ///
    /// Returns the node that now holds the value, and the previous value if there was one.
    pub(crate) fn insert(&mut self, key: &str, value: V) -> (&mut Self, Option<V>) {
        let symbol = match first_symbol(key) {
            Some(symbol) => symbol,
            None => {
                // the key ends exactly at this node
                let old = self.value.replace(value);
                return (self, old);
            }
        };
        match self.children.entry(symbol) {
            Entry::Vacant(entry) => {
                trace!(label = key, "leaf");
                (entry.insert(Self::single(key, value)), None)
            }
            Entry::Occupied(entry) => {
                let child = entry.into_mut();
                let (_, n) = super::common_prefix(key, child.label());
                if n < child.label.len() {
                    // the key leaves the label in the middle, or ends inside it
                    child.split(n);
                }
                child.insert(&key[n..], value)
            }
        }
    }

    /// remove the value at `key`, relative to the end of the label of this node.
    ///
    /// Every child on the path is normalized on the way back up, so merges cascade.
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let symbol = first_symbol(key)?;
        let child = self.children.get_mut(&symbol)?;
        let rest = key.strip_prefix(child.label())?;
        let removed = if rest.is_empty() {
            child.value.take()
        } else {
            child.remove(rest)
        };
        if removed.is_some() {
            if child.is_empty() {
                trace!(label = %child.label, "detach");
                self.children.remove(&symbol);
            } else {
                child.unsplit();
            }
        }
        removed
    }

    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Self> {
        let mut node = self;
        let mut rest = key;
        loop {
            let child = node.children.get_mut(&first_symbol(rest)?)?;
            rest = rest.strip_prefix(child.label())?;
            if rest.is_empty() {
                return Some(child);
            }
            node = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels<V>(node: &Node<V>) -> Vec<&str> {
        node.children().map(|c| c.label()).collect()
    }

    #[test]
    fn split_and_unsplit() {
        let mut node = Node::single("abcd", 1);
        node.split(2);
        assert_eq!(node.label(), "ab");
        assert_eq!(node.value(), None);
        assert_eq!(labels(&node), vec!["cd"]);
        assert_eq!(node.child('c').and_then(Node::value), Some(&1));
        node.unsplit();
        assert_eq!(node, Node::single("abcd", 1));
    }

    #[quickcheck_macros::quickcheck]
    fn split_unsplit_identity(label: String, at: usize) -> bool {
        let chars = label.chars().count();
        if chars < 2 {
            return true;
        }
        let n: usize = label.chars().take(1 + at % (chars - 1)).map(char::len_utf8).sum();
        let mut node = Node::single(&label, ());
        node.split(n);
        let split = node.label() == &label[..n] && node.value().is_none();
        node.unsplit();
        split && node == Node::single(&label, ())
    }

    #[test]
    fn split_multibyte() {
        let mut node = Node::single("ðomulus", ());
        node.split("ðomu".len());
        assert_eq!(node.label(), "ðomu");
        assert_eq!(labels(&node), vec!["lus"]);
    }

    #[test]
    fn unsplit_keeps_meaningful_nodes() {
        let mut root = Node::default();
        root.insert("ab", 1);
        root.insert("a", 2);
        let a = root.children.get_mut(&'a').unwrap();
        // has a value and a single child
        a.unsplit();
        assert_eq!(a.label(), "a");
        assert_eq!(a.value(), Some(&2));
    }

    #[test]
    fn insert_cases() {
        let mut root = Node::default();
        // new leaf
        let (node, old) = root.insert("abc", 1);
        assert_eq!((node.label(), old), ("abc", None));
        // overwrite
        let (node, old) = root.insert("abc", 2);
        assert_eq!((node.label(), old), ("abc", Some(1)));
        // key is a strict prefix of a label
        let (node, _) = root.insert("ab", 3);
        assert_eq!(node.label(), "ab");
        assert_eq!(labels(node), vec!["c"]);
        // three way split
        let (node, _) = root.insert("axy", 4);
        assert_eq!(node.label(), "xy");
        let joint = root.child('a').unwrap();
        assert_eq!(joint.label(), "a");
        assert_eq!(joint.value(), None);
        assert_eq!(labels(joint), vec!["b", "xy"]);
        // key continues below an existing label
        let (node, _) = root.insert("abcde", 5);
        assert_eq!(node.label(), "de");
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn remove_cases() {
        let mut root = Node::default();
        for (k, v) in [("a", 1), ("ab", 2), ("ac", 3), ("abd", 4)] {
            root.insert(k, v);
        }
        // value and two children, only the value goes
        assert_eq!(root.remove("a"), Some(1));
        assert_eq!(root.child('a').map(Node::label), Some("a"));
        assert_eq!(root.child('a').and_then(Node::value), None);
        // value and one child, merge
        assert_eq!(root.remove("ab"), Some(2));
        let a = root.child('a').unwrap();
        assert_eq!(labels(a), vec!["bd", "c"]);
        // leaf, detach and cascade the merge of the joint node
        assert_eq!(root.remove("ac"), Some(3));
        assert_eq!(labels(&root), vec!["abd"]);
        assert_eq!(root.remove("abd"), Some(4));
        assert!(root.is_empty());
    }

    #[test]
    fn remove_absent() {
        let mut root = Node::default();
        root.insert("abc", 1);
        root.insert("abd", 2);
        let before = root.clone();
        assert_eq!(root.remove("ab"), None);
        assert_eq!(root.remove("abcd"), None);
        assert_eq!(root.remove("x"), None);
        assert_eq!(root.remove("a"), None);
        assert_eq!(root, before);
    }
}
