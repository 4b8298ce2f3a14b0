//! Job-shop solvers.
//!
//! - [`GreedySolver`]: priority-rule construction
//! - [`DescentSolver`]: steepest descent over critical-block swaps
//! - [`TabuSolver`]: tabu walk over the same neighborhood
//!
//! All solvers are single-threaded and deterministic; a run is bounded only
//! by a wall-clock [`Deadline`] (and, for tabu search, an iteration budget).
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use u_jobshop::models::Instance;
//! use u_jobshop::solver::{DescentSolver, ExitCause, Solver};
//!
//! let instance = Instance::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]]).unwrap();
//! let solution = DescentSolver::new().solve(&instance, Duration::from_secs(1)).unwrap();
//! assert_eq!(solution.exit_cause, ExitCause::Blocked);
//! assert_eq!(solution.makespan(), Some(6));
//! ```

mod deadline;
mod descent;
mod error;
mod greedy;
pub mod tabu;

pub use deadline::Deadline;
pub use descent::DescentSolver;
pub use error::SolveError;
pub use greedy::GreedySolver;
pub use tabu::{TabuConfig, TabuMemory, TabuSolver};

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::encoding::ResourceOrder;
use crate::models::{Instance, Schedule};

/// Why a solver returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCause {
    /// The deadline passed during construction; the ordering is partial.
    Timeout,
    /// The search space was exhausted (or, for local search, the deadline
    /// passed with a complete incumbent).
    Blocked,
}

/// Outcome of a solver run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Final machine ordering.
    pub order: ResourceOrder,
    /// Schedule of `order`; `None` when the ordering is partial.
    pub schedule: Option<Schedule>,
    /// Why the solver stopped.
    pub exit_cause: ExitCause,
}

impl Solution {
    /// Evaluates `order` and bundles it with its exit cause.
    pub fn new(instance: &Instance, order: ResourceOrder, exit_cause: ExitCause) -> Self {
        let schedule = order.to_schedule(instance);
        Self {
            order,
            schedule,
            exit_cause,
        }
    }

    /// Makespan of the schedule, if there is one.
    pub fn makespan(&self) -> Option<i64> {
        self.schedule.as_ref().map(Schedule::makespan)
    }
}

/// A job-shop solver.
pub trait Solver {
    /// Solver name, for reporting.
    fn name(&self) -> &'static str;

    /// Solves `instance` within `budget` of wall-clock time.
    ///
    /// # Errors
    /// Only on an internal invariant violation; running out of time is
    /// reported through [`Solution::exit_cause`].
    fn solve(&self, instance: &Instance, budget: Duration) -> Result<Solution, SolveError>;
}
