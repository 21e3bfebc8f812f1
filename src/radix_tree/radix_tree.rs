use super::{find, FindResult, IterKey, Iter, Node, Values};
use crate::ValidationError;
use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;
use tracing::debug;

/// A radix tree (PATRICIA trie) mapping string keys to values.
///
/// Keys are matched code point by code point. Common prefixes are stored once, and the shape
/// of the tree only depends on the set of keys it contains, not on the order of operations.
///
/// ```
/// use radix_trie::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("tester", 1).unwrap();
/// tree.insert("testering", 2).unwrap();
/// tree.insert("te", 3).unwrap();
/// assert_eq!(tree.find("tester").map(|node| node.label()), Some("ster"));
/// assert_eq!(tree.get_all_with_prefix("test"), vec![&1, &2]);
/// assert_eq!(tree.remove("te"), Some(3));
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadixTree<V> {
    pub(crate) root: Node<V>,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self {
            root: Node::default(),
        }
    }
}

impl<V> RadixTree<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node. Its label is always empty and it never holds a value.
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Inserts `value` at `key`, returning the node that now holds it.
    ///
    /// An existing value at `key` is overwritten.
    pub fn set(&mut self, key: &str, value: V) -> Result<&mut Node<V>, ValidationError> {
        if key.is_empty() {
            debug!("rejected empty key");
            return Err(ValidationError::EmptyKey);
        }
        Ok(self.root.insert(key, value).0)
    }

    /// Inserts `value` at `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, ValidationError> {
        if key.is_empty() {
            debug!("rejected empty key");
            return Err(ValidationError::EmptyKey);
        }
        Ok(self.root.insert(key, value).1)
    }

    /// Like [insert](Self::insert), for a key that still has to be validated as utf-8.
    ///
    /// On error the tree is unchanged.
    pub fn insert_bytes(&mut self, key: &[u8], value: V) -> Result<Option<V>, ValidationError> {
        let key = std::str::from_utf8(key).map_err(|cause| {
            debug!(valid_up_to = cause.valid_up_to(), "rejected key that is not utf-8");
            ValidationError::from(cause)
        })?;
        self.insert(key, value)
    }

    /// The node exactly at `key`, which may be a joint node without a value.
    pub fn find(&self, key: &str) -> Option<&Node<V>> {
        if key.is_empty() {
            return None;
        }
        match find(&self.root, key) {
            FindResult::Found(tree) => Some(tree),
            _ => None,
        }
    }

    /// Alias for [find](Self::find).
    pub fn subtree(&self, key: &str) -> Option<&Node<V>> {
        self.find(key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        self.root.find_mut(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).and_then(Node::value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find_mut(key).and_then(Node::value_mut)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The topmost node whose subtree contains exactly the keys starting with `prefix`.
    ///
    /// The label of the node may extend beyond the prefix. For the empty prefix this is
    /// the root.
    pub fn subtree_with_prefix(&self, prefix: &str) -> Option<&Node<V>> {
        match find(&self.root, prefix) {
            FindResult::Found(tree) | FindResult::Prefix { tree, .. } => Some(tree),
            FindResult::NotFound => None,
        }
    }

    /// All values whose key starts with `prefix`, in key order
    pub fn get_all_with_prefix(&self, prefix: &str) -> Vec<&V> {
        self.subtree_with_prefix(prefix)
            .map(|tree| tree.values().collect())
            .unwrap_or_default()
    }

    /// An iterator for all pairs with a certain prefix
    pub fn scan_prefix(&self, prefix: &str) -> Iter<'_, V> {
        match find(&self.root, prefix) {
            FindResult::Found(tree) => Iter::new(tree, IterKey::new(prefix)),
            FindResult::Prefix { tree, rt } => {
                let mut path = IterKey::new(prefix);
                let label = tree.label();
                path.append(&label[label.len() - rt..]);
                Iter::new(tree, path)
            }
            FindResult::NotFound => Iter::empty(),
        }
    }

    /// All keys starting with `prefix`, in order
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.scan_prefix(prefix).map(|(k, _)| k.into()).collect()
    }

    /// Removes the value at `key`, returning it.
    ///
    /// Nodes that become redundant are merged into their only child or dropped, all the way
    /// up. Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.root.remove(key)
    }

    /// Removes the value at `key`, if any.
    pub fn delete(&mut self, key: &str) {
        self.remove(key);
    }

    /// The number of keys. This walks the entire tree.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// iterate over all elements, in key order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root, IterKey::default())
    }

    /// iterate over all values - this is cheaper than iterating over elements, since it does not have to build the keys from fragments
    pub fn values(&self) -> Values<'_, V> {
        Values::new(&self.root)
    }

    /// Calls `f` for every key and value, in key order.
    pub fn for_each(&self, mut f: impl FnMut(&str, &V)) {
        for (key, value) in self.iter() {
            f(&key, value)
        }
    }

    /// A printable dump of the tree structure, one node per line
    pub fn dump(&self) -> Dump<'_, V> {
        Dump(&self.root)
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut res = RadixTree::default();
        res.extend(iter);
        res
    }
}

/// Empty keys are skipped.
impl<K: AsRef<str>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k.as_ref(), v).ok();
        }
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (IterKey, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Debug dump of a tree, see [RadixTree::dump]
pub struct Dump<'a, V>(&'a Node<V>);

impl<V: Debug> Display for Dump<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn dump<V: Debug>(f: &mut fmt::Formatter<'_>, node: &Node<V>, level: usize) -> fmt::Result {
            writeln!(
                f,
                "{:indent$}'{}' value: {:?}",
                "",
                node.label(),
                node.value(),
                indent = level * 2
            )?;
            node.children().try_for_each(|child| dump(f, child, level + 1))
        }
        dump(f, self.0, 0)
    }
}
