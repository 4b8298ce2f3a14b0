//! Tabu Search execution.

use std::time::Duration;

use super::{TabuConfig, TabuMemory};
use crate::dispatching::PriorityRule;
use crate::encoding::ResourceOrder;
use crate::models::Instance;
use crate::neighborhood::candidate_swaps;
use crate::solver::{Deadline, ExitCause, GreedySolver, Solution, SolveError, Solver};

/// Tabu Search solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabuSolver {
    config: TabuConfig,
}

impl TabuSolver {
    /// Creates a tabu solver with the given configuration.
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }

    /// Runs the search against an existing deadline.
    ///
    /// Returns the best ordering seen. If the starting construction times
    /// out, its partial result is returned unchanged.
    #[tracing::instrument(level = "debug", name = "Tabu Search", skip(self, instance, deadline))]
    pub fn search(&self, instance: &Instance, deadline: &Deadline) -> Result<Solution, SolveError> {
        let (start, cause) = GreedySolver::new(PriorityRule::EstSpt).construct(instance, deadline)?;
        let Some(start_schedule) = start.to_schedule(instance) else {
            return Ok(Solution {
                order: start,
                schedule: None,
                exit_cause: cause,
            });
        };

        let mut walk = Walk::new(instance, start, start_schedule.makespan());
        tracing::debug!("Tabu: start makespan {}", walk.best_makespan);

        let mut iteration = 0usize;
        while iteration < self.config.max_iterations && !deadline.is_exceeded() {
            walk.step(instance, iteration, self.config.tabu_tenure);
            iteration += 1;
        }

        tracing::debug!(
            "Tabu: finished after {} iterations at {}",
            iteration,
            walk.best_makespan
        );
        Ok(Solution::new(instance, walk.best, ExitCause::Blocked))
    }
}

/// Walk state carried from one iteration to the next.
#[derive(Debug, Clone)]
struct Walk {
    current: ResourceOrder,
    best: ResourceOrder,
    best_makespan: i64,
    memory: TabuMemory,
}

impl Walk {
    fn new(instance: &Instance, start: ResourceOrder, makespan: i64) -> Self {
        Self {
            best: start.clone(),
            current: start,
            best_makespan: makespan,
            memory: TabuMemory::new(instance.num_machines(), instance.num_jobs()),
        }
    }

    /// Applies every allowed swap of the current critical blocks in turn.
    ///
    /// Swaps are generated once from the ordering at the start of the
    /// iteration; each feasible one replaces `current`, so later swaps act
    /// on the result of earlier ones.
    fn step(&mut self, instance: &Instance, iteration: usize, tenure: usize) {
        for swap in candidate_swaps(instance, &self.current) {
            if !self.memory.is_allowed(&swap, iteration) {
                continue;
            }
            let mut candidate = self.current.clone();
            swap.apply_on(&mut candidate);
            self.memory.forbid(&swap, iteration.saturating_add(tenure));

            let Some(schedule) = candidate.to_schedule(instance) else {
                tracing::trace!("Tabu: {} is infeasible", swap);
                continue;
            };
            self.current = candidate;
            if schedule.makespan() < self.best_makespan {
                self.best_makespan = schedule.makespan();
                self.best = self.current.clone();
                tracing::debug!(
                    "Tabu: iteration {} new best {} via {}",
                    iteration,
                    self.best_makespan,
                    swap
                );
            }
        }
    }
}

impl Solver for TabuSolver {
    fn name(&self) -> &'static str {
        "Tabu"
    }

    fn solve(&self, instance: &Instance, budget: Duration) -> Result<Solution, SolveError> {
        self.search(instance, &Deadline::after(budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use crate::neighborhood::Swap;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn op(job: usize, task: usize) -> Operation {
        Operation::new(job, task)
    }

    fn two_by_two() -> Instance {
        Instance::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]]).unwrap()
    }

    fn three_by_two() -> Instance {
        Instance::new(
            2,
            vec![
                vec![(0, 3), (1, 1)],
                vec![(0, 3), (1, 3)],
                vec![(0, 1), (1, 3)],
            ],
        )
        .unwrap()
    }

    fn job_order_walk(inst: &Instance) -> Walk {
        let start = ResourceOrder::from_sequences(
            inst,
            vec![
                vec![op(0, 0), op(1, 0), op(2, 0)],
                vec![op(0, 1), op(1, 1), op(2, 1)],
            ],
        )
        .unwrap();
        assert_eq!(start.to_schedule(inst).unwrap().makespan(), 12);
        Walk::new(inst, start, 12)
    }

    #[test]
    fn test_step_applies_swaps_in_sequence() {
        let inst = three_by_two();
        let mut walk = job_order_walk(&inst);

        // Both swaps are taken even though each worsens the makespan to 13;
        // the second acts on the result of the first.
        walk.step(&inst, 0, 2);
        assert_eq!(walk.current.machine_sequence(0), &[op(1, 0), op(0, 0), op(2, 0)]);
        assert_eq!(walk.current.machine_sequence(1), &[op(0, 1), op(2, 1), op(1, 1)]);
        assert_eq!(walk.current.to_schedule(&inst).unwrap().makespan(), 13);
        assert_eq!(walk.best_makespan, 12);
        assert_eq!(walk.memory.expiry(&Swap::new(0, 1, 0)), 2);
        assert_eq!(walk.memory.expiry(&Swap::new(1, 2, 1)), 2);

        // The critical path now crosses a three-operation block on M0. Its
        // second swap reaches 10; the M1 swap is still tabu and skipped.
        walk.step(&inst, 1, 2);
        assert_eq!(walk.current.machine_sequence(0), &[op(0, 0), op(2, 0), op(1, 0)]);
        assert_eq!(walk.current.machine_sequence(1), &[op(0, 1), op(2, 1), op(1, 1)]);
        assert_eq!(walk.best_makespan, 10);
        assert_eq!(walk.best, walk.current);
        assert_eq!(walk.memory.expiry(&Swap::new(0, 0, 1)), 3);
        assert_eq!(walk.memory.expiry(&Swap::new(0, 1, 2)), 3);
        assert_eq!(walk.memory.expiry(&Swap::new(1, 2, 1)), 2);
    }

    #[test]
    fn test_huge_tenure_saturates() {
        let inst = three_by_two();
        let mut walk = job_order_walk(&inst);
        walk.step(&inst, 1, usize::MAX);
        assert_eq!(walk.memory.expiry(&Swap::new(0, 1, 0)), usize::MAX);

        let solution = TabuSolver::new(TabuConfig::default().with_tabu_tenure(usize::MAX))
            .search(&two_by_two(), &Deadline::never())
            .unwrap();
        assert_eq!(solution.makespan(), Some(6));
    }

    #[test]
    fn test_two_by_two_keeps_best() {
        // The only move worsens the makespan to 10; the walk takes it but
        // the best stays at the greedy start.
        let inst = two_by_two();
        let solution = TabuSolver::default().search(&inst, &Deadline::never()).unwrap();
        assert_eq!(solution.exit_cause, ExitCause::Blocked);
        assert_eq!(solution.makespan(), Some(6));
    }

    #[test]
    fn test_zero_iterations_returns_start() {
        let mut rng = SmallRng::seed_from_u64(5);
        let inst = Instance::random(7, 4, 20, &mut rng).unwrap();
        let start = GreedySolver::new(PriorityRule::EstSpt)
            .solve_until(&inst, &Deadline::never())
            .unwrap();
        let solution = TabuSolver::new(TabuConfig::default().with_max_iterations(0))
            .search(&inst, &Deadline::never())
            .unwrap();
        assert_eq!(solution.order, start.order);
        assert_eq!(solution.exit_cause, ExitCause::Blocked);
    }

    #[test]
    fn test_never_worse_than_start() {
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let inst = Instance::random(10, 5, 40, &mut rng).unwrap();
            let start = GreedySolver::new(PriorityRule::EstSpt)
                .solve_until(&inst, &Deadline::never())
                .unwrap();
            let solution = TabuSolver::new(TabuConfig::default().with_max_iterations(30))
                .search(&inst, &Deadline::never())
                .unwrap();

            assert!(solution.schedule.as_ref().unwrap().is_valid(&inst));
            assert!(solution.makespan() <= start.makespan());
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = SmallRng::seed_from_u64(9);
        let inst = Instance::random(6, 4, 15, &mut rng).unwrap();
        let solver = TabuSolver::new(TabuConfig::default().with_max_iterations(20));
        let a = solver.search(&inst, &Deadline::never()).unwrap();
        let b = solver.search(&inst, &Deadline::never()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_timeout_is_returned_unchanged() {
        let solution = TabuSolver::default().solve(&two_by_two(), Duration::ZERO).unwrap();
        assert_eq!(solution.exit_cause, ExitCause::Timeout);
        assert!(solution.schedule.is_none());
    }
}
