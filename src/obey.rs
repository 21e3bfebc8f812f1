use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

///
/// A support trait for testing any kind of map against a reference model.
///
/// The radix tree and a `BTreeMap` both can be viewed as a function from keys to optional values.
///
pub trait TestSamples<K, V> {
    /// produces "interesting" sample points to test a property for.
    fn samples(&self, res: &mut BTreeSet<K>);

    /// gets the value of the collection at position k
    fn at(&self, k: K) -> V;
}

impl<V: Clone> TestSamples<String, Option<V>> for BTreeMap<String, V> {
    fn samples(&self, res: &mut BTreeSet<String>) {
        res.insert(String::new());
        for k in self.keys() {
            key_samples(k, res);
        }
    }

    fn at(&self, k: String) -> Option<V> {
        self.get(&k).cloned()
    }
}

/// a key, plus the keys one symbol shorter and one symbol longer
pub fn key_samples(key: &str, res: &mut BTreeSet<String>) {
    let mut shorter = key.to_owned();
    shorter.pop();
    let mut longer = key.to_owned();
    longer.push('a');
    res.insert(key.to_owned());
    res.insert(shorter);
    res.insert(longer);
}

/// true if `a` and `b` agree at all sample points of both
pub fn same_at_samples<A, B, K, V>(a: &A, b: &B) -> bool
where
    A: TestSamples<K, V> + Debug,
    B: TestSamples<K, V> + Debug,
    K: Ord + Clone + Debug,
    V: Eq + Debug,
{
    let mut s: BTreeSet<K> = BTreeSet::new();
    a.samples(&mut s);
    b.samples(&mut s);
    s.into_iter().all(|key| {
        let actual = a.at(key.clone());
        let expected = b.at(key.clone());
        if expected != actual {
            println!(
                "expected!=actual at: {:?}. {:?}!={:?}",
                key, expected, actual
            );
            println!("a: {:?}", a);
            println!("b: {:?}", b);
            false
        } else {
            true
        }
    })
}
