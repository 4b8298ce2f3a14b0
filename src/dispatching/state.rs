//! Dispatch state threaded through greedy construction.

use crate::models::{Instance, Operation};

/// Counters read by dispatching rules.
///
/// Owned by the construction loop and updated explicitly after every
/// dispatch; rules only ever see it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchState {
    /// Per-job ready time (sum of dispatched durations of the job).
    pub job_ready: Vec<i64>,
    /// Per-machine ready time (sum of dispatched durations on the machine).
    pub machine_ready: Vec<i64>,
    /// Per-job processing time not yet dispatched.
    pub remaining: Vec<i64>,
}

impl DispatchState {
    /// Initial state: nothing dispatched, all ready times zero.
    pub fn new(instance: &Instance) -> Self {
        Self {
            job_ready: vec![0; instance.num_jobs()],
            machine_ready: vec![0; instance.num_machines()],
            remaining: (0..instance.num_jobs())
                .map(|job| instance.total_duration(job))
                .collect(),
        }
    }

    /// Earliest start time: `max(job ready, machine ready)`.
    #[inline]
    pub fn earliest_start(&self, op: Operation, instance: &Instance) -> i64 {
        self.job_ready[op.job].max(self.machine_ready[instance.machine(op)])
    }

    /// Records that `op` has been dispatched.
    ///
    /// Both ready counters advance by the operation's duration and the
    /// job's remaining time shrinks by the same amount.
    pub fn record_dispatch(&mut self, op: Operation, instance: &Instance) {
        let duration = instance.duration(op);
        self.job_ready[op.job] += duration;
        self.machine_ready[instance.machine(op)] += duration;
        self.remaining[op.job] -= duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Instance {
        Instance::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]]).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let inst = two_by_two();
        let state = DispatchState::new(&inst);
        assert_eq!(state.job_ready, vec![0, 0]);
        assert_eq!(state.machine_ready, vec![0, 0]);
        assert_eq!(state.remaining, vec![5, 5]);
    }

    #[test]
    fn test_record_dispatch() {
        let inst = two_by_two();
        let mut state = DispatchState::new(&inst);
        state.record_dispatch(Operation::new(1, 0), &inst);
        assert_eq!(state.job_ready, vec![0, 2]);
        assert_eq!(state.machine_ready, vec![0, 2]);
        assert_eq!(state.remaining, vec![5, 3]);

        // (1, 1) runs on M0, which is still free; the job is ready at 2.
        assert_eq!(state.earliest_start(Operation::new(1, 1), &inst), 2);
        // (0, 1) runs on M1, busy until 2; the job itself is ready at 0.
        assert_eq!(state.earliest_start(Operation::new(0, 1), &inst), 2);
    }
}
