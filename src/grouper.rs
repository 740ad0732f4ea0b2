//! Equivalence classes over hashable keys.
//!
//! Elements are partitioned into disjoint classes; `join` marks two
//! elements as equivalent (with transitive closure), `joined` tests
//! membership of the same class, and `classes` iterates each disjoint
//! class exactly once. Merging re-points the smaller class onto the
//! larger one, giving amortized near-constant joins.

use std::collections::HashMap;
use std::hash::Hash;

/// Union-find keyed by arbitrary hashable values.
#[derive(Clone, Debug, Default)]
pub struct EquivalenceGrouper<K> {
    mapping: HashMap<K, usize>,
    sets: Vec<Vec<K>>,
}

impl<K: Eq + Hash + Clone> EquivalenceGrouper<K> {
    pub fn new() -> Self {
        Self {
            mapping: HashMap::new(),
            sets: Vec::new(),
        }
    }

    /// Ensures `a` belongs to some class, creating a singleton if unseen.
    pub fn add(&mut self, a: K) {
        if !self.mapping.contains_key(&a) {
            self.mapping.insert(a.clone(), self.sets.len());
            self.sets.push(vec![a]);
        }
    }

    /// Marks `a` and `b` as equivalent, merging their classes.
    pub fn join(&mut self, a: K, b: K) {
        self.add(a.clone());
        let set_a = self.mapping[&a];
        match self.mapping.get(&b).copied() {
            None => {
                self.sets[set_a].push(b.clone());
                self.mapping.insert(b, set_a);
            }
            Some(set_b) if set_b != set_a => {
                // Re-point the smaller class onto the larger one.
                let (into, from) = if self.sets[set_a].len() >= self.sets[set_b].len() {
                    (set_a, set_b)
                } else {
                    (set_b, set_a)
                };
                let moved = std::mem::take(&mut self.sets[from]);
                for elem in &moved {
                    self.mapping.insert(elem.clone(), into);
                }
                self.sets[into].extend(moved);
            }
            Some(_) => {}
        }
    }

    /// True iff `a` and `b` are members of the same class. Unseen keys are
    /// equivalent to nothing, not an error.
    pub fn joined(&self, a: &K, b: &K) -> bool {
        match (self.mapping.get(a), self.mapping.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Iterates every disjoint class once. Order of classes and of members
    /// within a class is unspecified.
    pub fn classes(&self) -> impl Iterator<Item = &[K]> {
        self.sets
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn class_sets(g: &EquivalenceGrouper<&'static str>) -> HashSet<Vec<&'static str>> {
        g.classes()
            .map(|c| {
                let mut v = c.to_vec();
                v.sort();
                v
            })
            .collect()
    }

    #[test]
    fn join_is_transitive() {
        let mut g = EquivalenceGrouper::new();
        g.join("a", "b");
        g.join("b", "c");
        g.join("d", "e");

        assert!(g.joined(&"a", &"b"));
        assert!(g.joined(&"a", &"c"));
        assert!(g.joined(&"b", &"a"));
        assert!(!g.joined(&"a", &"d"));
        assert!(!g.joined(&"a", &"z"));

        let expected: HashSet<Vec<&str>> =
            [vec!["a", "b", "c"], vec!["d", "e"]].into_iter().collect();
        assert_eq!(class_sets(&g), expected);
    }

    #[test]
    fn every_key_in_exactly_one_class() {
        let mut g = EquivalenceGrouper::new();
        g.join(1u32, 2);
        g.join(3, 4);
        g.join(2, 3);
        g.add(9);

        let mut seen = HashSet::new();
        for class in g.classes() {
            for k in class {
                assert!(seen.insert(*k), "key {k} yielded twice");
            }
        }
        assert_eq!(seen, [1, 2, 3, 4, 9].into_iter().collect());
    }

    #[test]
    fn add_is_idempotent_and_join_self_is_noop() {
        let mut g = EquivalenceGrouper::new();
        g.add("x");
        g.add("x");
        g.join("x", "x");
        assert_eq!(g.classes().count(), 1);
        assert!(g.joined(&"x", &"x"));
    }

    #[test]
    fn merge_prefers_larger_class() {
        let mut g = EquivalenceGrouper::new();
        g.join(1u32, 2);
        g.join(1, 3);
        g.join(10, 11);
        g.join(10, 1);
        for k in [1, 2, 3, 10, 11] {
            assert!(g.joined(&k, &1));
        }
        assert_eq!(g.classes().count(), 1);
    }
}
