//! Wall-clock time budget.

use std::time::{Duration, Instant};

/// A point in time after which a solver stops.
///
/// Solvers poll it at fixed points: after every dispatch during greedy
/// construction, once per round in descent, once per iteration in tabu
/// search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// Deadline `budget` from now. A budget too large to represent never
    /// expires.
    pub fn after(budget: Duration) -> Self {
        Instant::now()
            .checked_add(budget)
            .map_or_else(Self::never, |at| Self { at: Some(at) })
    }

    /// A deadline that never expires.
    pub fn never() -> Self {
        Self { at: None }
    }

    /// Whether the deadline has passed.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}
