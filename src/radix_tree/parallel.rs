//! Read only fan out over the subtrees of a tree, using rayon.
use super::{Node, RadixTree};
use rayon::prelude::*;

impl<V: Sync> RadixTree<V> {
    /// Same result as [get_all_with_prefix](RadixTree::get_all_with_prefix), but the subtree
    /// below the prefix is collected with one task per child, joined before returning.
    ///
    /// Locating the prefix is sequential, at most one child can ever match.
    pub fn par_get_all_with_prefix(&self, prefix: &str) -> Vec<&V> {
        self.subtree_with_prefix(prefix)
            .map(par_values)
            .unwrap_or_default()
    }
}

fn par_values<V: Sync>(tree: &Node<V>) -> Vec<&V> {
    let mut res: Vec<&V> = tree.value().into_iter().collect();
    // collect keeps the order of the children
    let children: Vec<Vec<&V>> = tree.children.par_iter().map(|(_, c)| par_values(c)).collect();
    res.extend(children.into_iter().flatten());
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_as_sequential() {
        let tree: RadixTree<usize> = (0..1000)
            .map(|i| (format!("{}ð{}", i % 7, i), i))
            .collect();
        for prefix in ["", "1", "1ð", "1ð1", "3ð99", "8", "1ð1x"] {
            assert_eq!(
                tree.par_get_all_with_prefix(prefix),
                tree.get_all_with_prefix(prefix)
            );
        }
    }
}
