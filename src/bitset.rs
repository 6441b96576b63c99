/*!
# BitSet

A fixed-capacity, bounds-checked bit array on top of
[`stream_bitset::bitset::BitSetImpl`]. It backs the `n x n` adjacency bitmap of a
[`Graph`](crate::repr::Graph) (bit `u * n + v` is set iff `Edge(u, v)` exists) and the
visited-sets of traversals.

Every access outside `0..len` panics, independent of how many bits the underlying storage
rounds up to.
*/

use std::ops::Range;

use stream_bitset::bitset::BitSetImpl;

use crate::node::*;

/// Bounds-checked bit array with a fixed number of bits
#[derive(Clone)]
pub struct BitSet {
    bits: BitSetImpl<u32>,
    len: usize,
}

impl BitSet {
    /// Creates a new bitset of `len` unset bits.
    /// ** Panics if `len` does not fit into `u32` **
    pub fn new(len: usize) -> Self {
        let capacity = u32::try_from(len)
            .unwrap_or_else(|_| panic!("BitSet of {len} bits exceeds the addressable range"));
        Self {
            bits: BitSetImpl::new(capacity),
            len,
        }
    }

    /// Creates a bitset of `n * n` bits to be used as an adjacency bitmap of `n` nodes
    pub fn square(n: NumNodes) -> Self {
        Self::new(n as usize * n as usize)
    }

    /// Number of bits, ie. valid indices are `0..len`
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns *true* if the bitset has no bits at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn check(&self, idx: usize) -> u32 {
        assert!(
            idx < self.len,
            "Bit index {idx} out of range for a BitSet of {} bits",
            self.len
        );
        idx as u32
    }

    /// Sets bit `idx` and returns its previous value
    pub fn set(&mut self, idx: usize) -> bool {
        let idx = self.check(idx);
        self.bits.set_bit(idx)
    }

    /// Clears bit `idx` and returns its previous value
    pub fn clear(&mut self, idx: usize) -> bool {
        let idx = self.check(idx);
        self.bits.clear_bit(idx)
    }

    /// Returns the value of bit `idx`
    pub fn test(&self, idx: usize) -> bool {
        let idx = self.check(idx);
        self.bits.get_bit(idx)
    }

    /// Unsets all bits
    pub fn clear_all(&mut self) {
        self.bits.clear_all();
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.cardinality() as usize
    }

    /// Returns the smallest set index `>= lb` if it exists
    pub fn first_set_at_least(&self, lb: usize) -> Option<usize> {
        if lb >= self.len {
            return None;
        }

        self.bits
            .get_first_set_index_atleast(lb as u32)
            .map(|idx| idx as usize)
            .filter(|&idx| idx < self.len)
    }

    /// Returns the smallest set index in `range` if it exists
    pub fn first_set_in(&self, range: Range<usize>) -> Option<usize> {
        self.first_set_at_least(range.start)
            .filter(|&idx| idx < range.end)
    }

    /// Iterates over all set indices in increasing order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        let mut lb = 0;
        std::iter::from_fn(move || {
            let idx = self.first_set_at_least(lb)?;
            lb = idx + 1;
            Some(idx)
        })
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitSet")
            .field("len", &self.len)
            .field("ones", &self.iter_ones().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn set_clear_test() {
        let mut bits = BitSet::new(100);
        assert_eq!(bits.len(), 100);
        assert_eq!(bits.count_ones(), 0);

        assert!(!bits.set(17));
        assert!(bits.set(17));
        assert!(bits.test(17));
        assert!(!bits.test(16));
        assert_eq!(bits.count_ones(), 1);

        assert!(bits.clear(17));
        assert!(!bits.clear(17));
        assert!(!bits.test(17));
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn scans_match_reference() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for len in [1usize, 63, 64, 65, 200, 1000] {
            let mut bits = BitSet::new(len);
            let mut reference = vec![false; len];
            for _ in 0..len / 3 + 1 {
                let i = rng.random_range(0..len);
                bits.set(i);
                reference[i] = true;
            }

            let expected = reference.iter().positions(|&b| b).collect_vec();
            assert_eq!(bits.iter_ones().collect_vec(), expected);
            assert_eq!(bits.count_ones(), expected.len());

            for lb in 0..len {
                let naive = expected.iter().copied().find(|&i| i >= lb);
                assert_eq!(bits.first_set_at_least(lb), naive);
            }
            assert_eq!(bits.first_set_at_least(len), None);
        }
    }

    #[test]
    fn scan_within_row() {
        let mut bits = BitSet::square(4);
        assert_eq!(bits.len(), 16);
        bits.set(4 + 3);
        bits.set(8);

        assert_eq!(bits.first_set_in(4..8), Some(7));
        assert_eq!(bits.first_set_in(0..4), None);
        assert_eq!(bits.first_set_in(8..12), Some(8));
        assert_eq!(bits.first_set_in(9..12), None);

        bits.clear_all();
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access() {
        let bits = BitSet::new(10);
        bits.test(10);
    }
}
