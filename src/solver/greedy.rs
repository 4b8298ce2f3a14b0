//! Greedy construction by priority dispatching.
//!
//! # Algorithm
//!
//! 1. The ready set holds the first operation of every job
//! 2. While it is non-empty:
//!    a. Select one operation with the priority rule
//!    b. Append it to its machine's sequence
//!    c. Promote the job's next operation into the ready set
//!    d. Update the dispatch counters
//!
//! Every operation is dispatched after its job predecessor and appended
//! behind everything already on its machine, so a completed ordering is
//! always feasible.
//!
//! # Reference
//! Giffler & Thompson (1960), "Algorithms for Solving Production-Scheduling
//! Problems", Operations Research 8(4)

use std::time::Duration;

use super::{Deadline, ExitCause, Solution, SolveError, Solver};
use crate::dispatching::{DispatchState, PriorityRule};
use crate::encoding::ResourceOrder;
use crate::models::{Instance, Operation};

/// Constructs one ordering with a fixed priority rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedySolver {
    rule: PriorityRule,
}

impl GreedySolver {
    /// Creates a greedy solver for `rule`.
    pub fn new(rule: PriorityRule) -> Self {
        Self { rule }
    }

    /// Builds an ordering, stopping early if `deadline` passes.
    ///
    /// Returns a complete ordering with [`ExitCause::Blocked`], or the
    /// partial ordering built so far with [`ExitCause::Timeout`].
    ///
    /// # Errors
    /// [`SolveError::NoEligibleOperation`] if the rule selects nothing from
    /// a non-empty ready set.
    #[tracing::instrument(level = "debug", name = "Greedy", skip(self, instance, deadline), fields(rule = %self.rule))]
    pub fn construct(
        &self,
        instance: &Instance,
        deadline: &Deadline,
    ) -> Result<(ResourceOrder, ExitCause), SolveError> {
        let engine = self.rule.engine();
        let mut order = ResourceOrder::new(instance);
        let mut state = DispatchState::new(instance);
        let mut doable: Vec<Operation> = (0..instance.num_jobs())
            .map(|job| Operation::new(job, 0))
            .collect();

        while !doable.is_empty() {
            let index = engine.select_best(&doable, instance, &state).ok_or(
                SolveError::NoEligibleOperation {
                    rule: self.rule,
                    doable: doable.len(),
                },
            )?;
            let op = doable.remove(index);
            tracing::trace!(
                "dispatched {} on machine {} with scores {:?}",
                op,
                instance.machine(op),
                engine.evaluate(op, instance, &state)
            );
            order.push(instance.machine(op), op);

            if op.task + 1 < instance.num_tasks() {
                doable.push(op.job_successor());
            }
            state.record_dispatch(op, instance);

            if deadline.is_exceeded() {
                tracing::warn!(
                    "Greedy: deadline passed with {} of {} operations dispatched",
                    order.len(),
                    instance.num_operations()
                );
                return Ok((order, ExitCause::Timeout));
            }
        }

        Ok((order, ExitCause::Blocked))
    }

    /// Builds and evaluates an ordering against an existing deadline.
    pub fn solve_until(
        &self,
        instance: &Instance,
        deadline: &Deadline,
    ) -> Result<Solution, SolveError> {
        let (order, exit_cause) = self.construct(instance, deadline)?;
        Ok(Solution::new(instance, order, exit_cause))
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        match self.rule {
            PriorityRule::Spt => "Greedy (SPT)",
            PriorityRule::Lrpt => "Greedy (LRPT)",
            PriorityRule::EstSpt => "Greedy (EST_SPT)",
            PriorityRule::EstLrpt => "Greedy (EST_LRPT)",
        }
    }

    fn solve(&self, instance: &Instance, budget: Duration) -> Result<Solution, SolveError> {
        self.solve_until(instance, &Deadline::after(budget))
    }
}
