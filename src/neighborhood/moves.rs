//! Block and swap value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::ResourceOrder;

/// A run of consecutive critical operations on one machine.
///
/// `first` and `last` are positions in the machine's sequence, with
/// `first < last`.
///
/// ```text
/// machine 0 : (0,1) (1,2) (2,2)
/// machine 1 : (0,2) (2,1) (1,1)
///
/// Block { machine: 1, first: 0, last: 1 }  =>  [(0,2) (2,1)]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Machine the block lies on.
    pub machine: usize,
    /// Position of the first operation of the block.
    pub first: usize,
    /// Position of the last operation of the block.
    pub last: usize,
}

impl Block {
    /// Creates a block.
    #[inline]
    pub fn new(machine: usize, first: usize, last: usize) -> Self {
        debug_assert!(first < last, "a block spans at least two positions");
        Self {
            machine,
            first,
            last,
        }
    }

    /// Number of operations in the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always false; blocks hold at least two operations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Exchange of two positions within one machine's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    /// Machine whose sequence is modified.
    pub machine: usize,
    /// One position.
    pub t1: usize,
    /// The other position.
    pub t2: usize,
}

impl Swap {
    /// Creates a swap.
    #[inline]
    pub fn new(machine: usize, t1: usize, t2: usize) -> Self {
        debug_assert_ne!(t1, t2);
        Self { machine, t1, t2 }
    }

    /// Applies the swap in place. Applying it twice restores the ordering.
    #[inline]
    pub fn apply_on(&self, order: &mut ResourceOrder) {
        order.swap(self.machine, self.t1, self.t2);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}[{} <-> {}]", self.machine, self.t1, self.t2)
    }
}
