//! Steepest descent over critical-block swaps.
//!
//! # Algorithm
//!
//! 1. Build a starting ordering with greedy EST_LRPT
//! 2. Each round, evaluate every boundary swap of every critical block on
//!    an independent copy of the incumbent
//! 3. Adopt the candidate with the lowest makespan if it strictly improves
//! 4. Stop at a local optimum or when the deadline passes
//!
//! Converging and running out of time both exit with
//! [`ExitCause::Blocked`].

use std::time::Duration;

use super::{Deadline, ExitCause, GreedySolver, Solution, SolveError, Solver};
use crate::dispatching::PriorityRule;
use crate::models::Instance;
use crate::neighborhood::candidate_swaps;

const START_RULE: PriorityRule = PriorityRule::EstLrpt;

/// Steepest-descent local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescentSolver;

impl DescentSolver {
    /// Creates a descent solver starting from greedy EST_LRPT.
    pub fn new() -> Self {
        Self
    }

    /// Runs the descent against an existing deadline.
    ///
    /// If the starting construction times out, its partial result is
    /// returned unchanged.
    #[tracing::instrument(level = "debug", name = "Descent", skip(self, instance, deadline))]
    pub fn improve(&self, instance: &Instance, deadline: &Deadline) -> Result<Solution, SolveError> {
        let (start, cause) = GreedySolver::new(START_RULE).construct(instance, deadline)?;
        let Some(start_schedule) = start.to_schedule(instance) else {
            return Ok(Solution {
                order: start,
                schedule: None,
                exit_cause: cause,
            });
        };

        let mut best = start;
        let mut best_makespan = start_schedule.makespan();
        tracing::debug!("Descent: start makespan {}", best_makespan);

        let mut rounds = 0usize;
        while !deadline.is_exceeded() {
            let base = best.clone();
            let mut improved = false;

            for swap in candidate_swaps(instance, &base) {
                let mut candidate = base.clone();
                swap.apply_on(&mut candidate);
                let Some(schedule) = candidate.to_schedule(instance) else {
                    tracing::trace!("Descent: {} is infeasible", swap);
                    continue;
                };
                if schedule.makespan() < best_makespan {
                    tracing::trace!("Descent: {} improves to {}", swap, schedule.makespan());
                    best = candidate;
                    best_makespan = schedule.makespan();
                    improved = true;
                }
            }

            rounds += 1;
            if !improved {
                break;
            }
            tracing::debug!("Descent: round {} new best {}", rounds, best_makespan);
        }

        tracing::debug!("Descent: finished after {} rounds at {}", rounds, best_makespan);
        Ok(Solution::new(instance, best, ExitCause::Blocked))
    }
}

impl Solver for DescentSolver {
    fn name(&self) -> &'static str {
        "Descent"
    }

    fn solve(&self, instance: &Instance, budget: Duration) -> Result<Solution, SolveError> {
        self.improve(instance, &Deadline::after(budget))
    }
}
