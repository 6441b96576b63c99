use std::fmt::Display;

use itertools::Itertools;
use tracing::trace;

use super::*;

/// Disjoint sets over the elements `0..n` (union-find).
///
/// Every element stores either the index of its parent (`>= 0`) or, if it is the root of its set,
/// the negated size of the set. Sets are identified by their root. [`FindMerge::find`] halves
/// paths on the way up; [`FindMerge::merge`] attaches the smaller set below the root of the
/// larger one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMerge {
    sets: Vec<i32>,
}

impl FindMerge {
    /// Number of elements of [`FindMerge::default`]
    pub const DEFAULT_NUM_NODES: NumNodes = 10;

    /// Smallest number of elements accepted from a text description
    pub const MIN_NODES: NumNodes = 5;

    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            sets: vec![-1; n as usize],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns *true* if there are no elements
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the root of the set containing `u`, relinking every visited element to its
    /// grandparent on the way.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, u: Node) -> Node {
        let mut idx = u as usize;
        while self.sets[idx] >= 0 {
            let parent = self.sets[idx] as usize;
            let grandparent = self.sets[parent];
            if grandparent >= 0 {
                self.sets[idx] = grandparent;
            }
            idx = parent;
        }
        idx as Node
    }

    /// Returns the root of the set containing `u` without modifying the structure
    /// ** Panics if `u >= n` **
    pub fn find_root(&self, u: Node) -> Node {
        let mut idx = u as usize;
        while self.sets[idx] >= 0 {
            idx = self.sets[idx] as usize;
        }
        idx as Node
    }

    /// Unites the sets containing `u` and `v` and returns the root of the united set.
    /// On equal sizes the set of `v` survives.
    /// ** Panics if `u >= n || v >= n` **
    pub fn merge(&mut self, u: Node, v: Node) -> Node {
        let ru = self.find(u);
        if u == v {
            return ru;
        }

        let rv = self.find(v);
        if ru == rv {
            return ru;
        }

        let (ru, rv) = (ru as usize, rv as usize);
        trace!(u, v, size_u = -self.sets[ru], size_v = -self.sets[rv], "merge");

        // sizes are stored negated: the more negative root is the larger set
        let (big, small) = if self.sets[ru] < self.sets[rv] {
            (ru, rv)
        } else {
            (rv, ru)
        };
        self.sets[big] += self.sets[small];
        self.sets[small] = big as i32;
        big as Node
    }

    /// Returns *true* if `u` and `v` are in the same set
    pub fn same_set(&self, u: Node, v: Node) -> bool {
        self.find_root(u) == self.find_root(v)
    }

    /// Number of elements in the set containing `u`
    pub fn set_size(&self, u: Node) -> NumNodes {
        (-self.sets[self.find_root(u) as usize]) as NumNodes
    }

    /// Number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.sets.iter().filter(|&&x| x < 0).count() as NumNodes
    }

    /// Returns all sets as `(root, members)` ordered by root, members in ascending order
    pub fn sets(&self) -> Vec<(Node, Vec<Node>)> {
        (0..self.len() as Node)
            .map(|u| (self.find_root(u), u))
            .into_group_map()
            .into_iter()
            .sorted_unstable_by_key(|(root, _)| *root)
            .collect()
    }

    /// Raw parent-or-negated-size entries
    pub fn raw(&self) -> &[i32] {
        &self.sets
    }
}

impl Default for FindMerge {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_NODES)
    }
}

impl Display for FindMerge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const RULE: &str = "-----------------------------";

        writeln!(f, "{RULE}")?;
        writeln!(f, "Num Nodes: {}", self.len())?;
        writeln!(f, "Array: {{ {} }}", self.sets.iter().join(" "))?;

        let sets = self.sets();
        writeln!(f, "SETS (#sets: {})", sets.len())?;
        writeln!(f, "----------------")?;
        for (root, members) in sets {
            writeln!(f, "  Set ID: {root} {{ {} }}", members.iter().join(" "))?;
        }
        writeln!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn merge_pairs() {
        let mut fm = FindMerge::new(5);
        fm.merge(0, 1);
        fm.merge(1, 2);
        fm.merge(3, 4);

        assert_eq!(fm.find(0), fm.find(2));
        assert_ne!(fm.find(0), fm.find(3));
        assert_eq!(fm.find(3), fm.find(4));
        assert_eq!(fm.number_of_sets(), 2);
        assert_eq!(fm.set_size(2), 3);
        assert_eq!(fm.set_size(4), 2);
        assert_eq!(fm.sets().len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut fm = FindMerge::new(6);
        let root = fm.merge(2, 5);
        let snapshot = fm.clone();

        assert_eq!(fm.merge(2, 5), root);
        assert_eq!(fm.merge(5, 2), root);
        assert_eq!(fm.merge(3, 3), 3);
        assert_eq!(fm, snapshot);
    }

    #[test]
    fn larger_set_survives() {
        let mut fm = FindMerge::new(6);
        fm.merge(0, 1);
        fm.merge(0, 2);
        let big = fm.find(0);

        assert_eq!(fm.merge(5, 0), big);
        assert_eq!(fm.merge(big, 3), big);
        assert_eq!(fm.raw()[big as usize], -5);

        // on equal sizes the second argument's set survives
        let mut fm = FindMerge::new(2);
        assert_eq!(fm.merge(0, 1), 1);
    }

    #[test]
    fn path_halving_keeps_roots() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let n = 64;

        for _ in 0..20 {
            let mut fm = FindMerge::new(n);
            let mut reference: Vec<Node> = (0..n).collect();

            for _ in 0..40 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                fm.merge(u, v);

                let (old, new) = (reference[u as usize], reference[v as usize]);
                for label in reference.iter_mut().filter(|l| **l == old) {
                    *label = new;
                }

                for a in 0..n {
                    let b = rng.random_range(0..n);
                    let expected = reference[a as usize] == reference[b as usize];
                    assert_eq!(fm.same_set(a, b), expected);
                    assert_eq!(fm.find(a) == fm.find(b), expected);
                }
            }

            let total: NumNodes = fm.sets().iter().map(|(_, m)| m.len() as NumNodes).sum();
            assert_eq!(total, n);
        }
    }

    #[test]
    fn default_size() {
        let fm = FindMerge::default();
        assert_eq!(fm.len(), FindMerge::DEFAULT_NUM_NODES as usize);
        assert_eq!(fm.number_of_sets(), FindMerge::DEFAULT_NUM_NODES);
    }

    #[test]
    fn display() {
        let mut fm = FindMerge::new(5);
        fm.merge(0, 1);
        fm.merge(3, 4);

        let expected = "\
-----------------------------
Num Nodes: 5
Array: { 1 -2 -1 4 -2 }
SETS (#sets: 3)
----------------
  Set ID: 1 { 0 1 }
  Set ID: 2 { 2 }
  Set ID: 4 { 3 4 }
-----------------------------
";
        assert_eq!(fm.to_string(), expected);
    }
}
