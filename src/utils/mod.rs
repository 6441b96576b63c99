/*!
# Utilities

- [`PrioQ`]: a binary heap whose elements can be looked up by identity and replaced in place,
  used by the tree-growing algorithms in [`algo`](crate::algo),
- [`Probability`]: range check for densities and other probabilities.
*/

use num::{One, Zero};

mod prio_q;

pub use prio_q::*;

/// Helper trait for probalities
pub trait Probability {
    /// Returns *true* if the probality is valid (ie. between `0` and `1`)
    fn is_valid_probility(&self) -> bool;
}

impl<P> Probability for P
where
    P: Zero + One + PartialOrd,
{
    fn is_valid_probility(&self) -> bool {
        Self::zero().le(self) && Self::one().ge(self)
    }
}
