/*!
# Augmented Priority Queue

A binary heap over a `Vec` that, beyond `insert`/`pop_top`, lets callers look up a stored
element by *identity* and replace it in place. Identity is given by [`Keyed::key`] and is
independent of the ordering used for heap positions.

Lookup is a linear scan and every [`PrioQ::change_value`] rebuilds the heap. Both are fine for
the graph sizes of this crate (at most [`MAX_NODES`](crate::MAX_NODES) elements); an
index-tracking decrease-key would make both logarithmic.
*/

use std::{cmp::Ordering, fmt::Display};

/// Elements with an identity that is independent of their priority
pub trait Keyed {
    type Key: PartialEq;

    /// Returns the identity of the element
    fn key(&self) -> Self::Key;
}

/// Position of an element inside a [`PrioQ`].
/// Only valid until the next mutation of the queue.
pub type PqIndex = usize;

/// Min-heap with respect to a comparator: the element comparing smallest is on top.
#[derive(Clone)]
pub struct PrioQ<T, C> {
    heap: Vec<T>,
    cmp: C,
}

impl<T, C> PrioQ<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty queue ordered by `cmp`
    pub fn new(cmp: C) -> Self {
        Self::with_capacity(0, cmp)
    }

    /// Creates an empty queue with preallocated space for `capacity` elements
    pub fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if the queue has no elements
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Inserts an element in `O(log n)`
    pub fn insert(&mut self, elem: T) {
        self.heap.push(elem);
        self.sift_up(self.heap.len() - 1);
    }

    /// Returns the element with highest priority without removing it
    pub fn get_top(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Removes and returns the element with highest priority in `O(log n)`
    pub fn pop_top(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }

        let top = self.heap.swap_remove(0);
        self.sift_down(0);
        Some(top)
    }

    /// Returns the element at a position obtained from [`PrioQ::contains`].
    /// ** Panics if `pos >= len` **
    pub fn get(&self, pos: PqIndex) -> &T {
        &self.heap[pos]
    }

    /// Mutable access to the element at `pos`.
    /// Changes that affect the ordering must be made through [`PrioQ::change_value`] instead.
    /// ** Panics if `pos >= len` **
    pub fn get_mut(&mut self, pos: PqIndex) -> &mut T {
        &mut self.heap[pos]
    }

    /// Overwrites the element at `pos` and restores the heap invariant for the whole queue.
    /// ** Panics if `pos >= len` **
    pub fn change_value(&mut self, pos: PqIndex, elem: T) {
        self.heap[pos] = elem;
        self.rebuild();
    }

    /// Iterates over all elements in heap order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    fn rebuild(&mut self) {
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn less(&self, i: usize, j: usize) -> bool {
        (self.cmp)(&self.heap[i], &self.heap[j]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };

            if !self.less(child, i) {
                break;
            }
            self.heap.swap(i, child);
            i = child;
        }
    }
}

impl<T, C> PrioQ<T, C>
where
    T: Keyed,
    C: Fn(&T, &T) -> Ordering,
{
    /// Scans the queue for an element with the same identity as `elem` and returns its position
    pub fn contains(&self, elem: &T) -> Option<PqIndex> {
        self.position_of(&elem.key())
    }

    /// Scans the queue for an element with the given identity and returns its position
    pub fn position_of(&self, key: &T::Key) -> Option<PqIndex> {
        self.heap.iter().position(|e| e.key() == *key)
    }
}

impl<T, C> Display for PrioQ<T, C>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PrioQ[{}]:", self.heap.len())?;
        for elem in &self.heap {
            writeln!(f, "  {elem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Item {
        id: u32,
        prio: u32,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    impl Display for Item {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "[{}]:{}", self.id, self.prio)
        }
    }

    fn by_prio(a: &Item, b: &Item) -> Ordering {
        a.prio.cmp(&b.prio).then(a.id.cmp(&b.id))
    }

    fn drain<C: Fn(&Item, &Item) -> Ordering>(pq: &mut PrioQ<Item, C>) -> Vec<u32> {
        std::iter::from_fn(|| pq.pop_top()).map(|x| x.prio).collect_vec()
    }

    #[test]
    fn pops_in_order() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for len in [0usize, 1, 2, 10, 100] {
            let mut pq = PrioQ::new(by_prio);
            let mut prios = (0..len)
                .map(|_| rng.random_range(0..50u32))
                .collect_vec();
            for (id, &prio) in prios.iter().enumerate() {
                pq.insert(Item { id: id as u32, prio });
            }
            assert_eq!(pq.len(), len);

            prios.sort_unstable();
            assert_eq!(drain(&mut pq), prios);
            assert!(pq.is_empty());
            assert!(pq.pop_top().is_none());
        }
    }

    #[test]
    fn max_first_comparator() {
        let mut pq = PrioQ::new(|a: &Item, b: &Item| b.prio.cmp(&a.prio));
        for (id, prio) in [3, 9, 1, 7].into_iter().enumerate() {
            pq.insert(Item { id: id as u32, prio });
        }
        assert_eq!(pq.get_top().map(|x| x.prio), Some(9));
        assert_eq!(drain(&mut pq), vec![9, 7, 3, 1]);
    }

    #[test]
    fn contains_by_identity() {
        let mut pq = PrioQ::new(by_prio);
        for id in 0..5 {
            pq.insert(Item { id, prio: 10 * id });
        }

        let pos = pq.contains(&Item { id: 3, prio: 0 }).unwrap();
        assert_eq!(*pq.get(pos), Item { id: 3, prio: 30 });

        // identity-only edits keep the order intact
        pq.get_mut(pos).id = 9;
        assert_eq!(pq.position_of(&9), Some(pos));
        assert_eq!(pq.position_of(&7), None);
    }

    #[test]
    fn change_value_restores_heap() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        let mut pq = PrioQ::new(by_prio);
        let mut reference = (0..40).map(|_| rng.random_range(0..1000u32)).collect_vec();
        for (id, &prio) in reference.iter().enumerate() {
            pq.insert(Item { id: id as u32, prio });
        }

        for _ in 0..100 {
            let id = rng.random_range(0..40u32);
            let prio = rng.random_range(0..1000u32);
            let pos = pq.position_of(&id).unwrap();
            pq.change_value(pos, Item { id, prio });
            reference[id as usize] = prio;
        }

        reference.sort_unstable();
        assert_eq!(drain(&mut pq), reference);
    }

    #[test]
    fn display() {
        let mut pq = PrioQ::new(by_prio);
        pq.insert(Item { id: 4, prio: 2 });
        pq.insert(Item { id: 1, prio: 1 });
        assert_eq!(pq.to_string(), "PrioQ[2]:\n  [1]:1\n  [4]:2\n");
    }
}
