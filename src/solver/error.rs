//! Solver errors.

use crate::dispatching::PriorityRule;

/// The error type for solver runs.
///
/// Running out of time is not an error; it is reported through
/// [`ExitCause`](super::ExitCause).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The priority rule selected nothing from a non-empty ready set.
    #[error("priority rule {rule} selected no operation among {doable} ready operations")]
    NoEligibleOperation {
        /// Rule in use.
        rule: PriorityRule,
        /// Size of the ready set.
        doable: usize,
    },
}
