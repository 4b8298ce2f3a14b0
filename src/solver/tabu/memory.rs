//! Swap-level tabu memory.

use crate::neighborhood::Swap;

/// Expiry iteration of every `(machine, t1, t2)` swap.
///
/// A swap is allowed at iteration `i` when its expiry is `<= i`. Entries
/// start at zero and never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuMemory {
    num_jobs: usize,
    expiry: Vec<usize>,
}

impl TabuMemory {
    /// Creates an all-zero table for `num_machines` sequences of
    /// `num_jobs` positions.
    pub fn new(num_machines: usize, num_jobs: usize) -> Self {
        Self {
            num_jobs,
            expiry: vec![0; num_machines * num_jobs * num_jobs],
        }
    }

    #[inline]
    fn index(&self, swap: &Swap) -> usize {
        (swap.machine * self.num_jobs + swap.t1) * self.num_jobs + swap.t2
    }

    /// Iteration from which `swap` is allowed again.
    #[inline]
    pub fn expiry(&self, swap: &Swap) -> usize {
        self.expiry[self.index(swap)]
    }

    /// Whether `swap` may be applied at `iteration`.
    #[inline]
    pub fn is_allowed(&self, swap: &Swap, iteration: usize) -> bool {
        self.expiry(swap) <= iteration
    }

    /// Forbids `swap` until `until`. An existing later expiry is kept.
    pub fn forbid(&mut self, swap: &Swap, until: usize) {
        let index = self.index(swap);
        let slot = &mut self.expiry[index];
        *slot = (*slot).max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_all_allowed() {
        let memory = TabuMemory::new(2, 3);
        for machine in 0..2 {
            for t1 in 0..3 {
                for t2 in 0..3 {
                    if t1 != t2 {
                        assert!(memory.is_allowed(&Swap::new(machine, t1, t2), 0));
                    }
                }
            }
        }
    }

    #[test]
    fn test_forbid_window() {
        let mut memory = TabuMemory::new(2, 3);
        let swap = Swap::new(1, 2, 1);
        memory.forbid(&swap, 4);
        assert!(!memory.is_allowed(&swap, 3));
        assert!(memory.is_allowed(&swap, 4));
        // Direction matters.
        assert!(memory.is_allowed(&Swap::new(1, 1, 2), 0));
        assert!(memory.is_allowed(&Swap::new(0, 2, 1), 0));
    }

    #[test]
    fn test_entries_never_decrease() {
        let mut memory = TabuMemory::new(1, 2);
        let swap = Swap::new(0, 0, 1);
        memory.forbid(&swap, 7);
        memory.forbid(&swap, 3);
        assert_eq!(memory.expiry(&swap), 7);
        memory.forbid(&swap, 9);
        assert_eq!(memory.expiry(&swap), 9);
    }
}
