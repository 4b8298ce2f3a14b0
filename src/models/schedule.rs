//! Schedule (solution) model.
//!
//! A schedule assigns a start time to every operation. Schedules are only
//! produced by [`ResourceOrder::to_schedule`](crate::encoding::ResourceOrder::to_schedule)
//! and are recomputed from scratch on every evaluation.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7.1

use serde::{Deserialize, Serialize};

use super::{Instance, Operation};

/// Start and end times of every operation of an instance.
///
/// Also records, for every operation, the operation processed immediately
/// before it on the same machine, which is what the critical path walks.
/// Deserialization rejects tables of mismatched shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct Schedule {
    start_times: Vec<Vec<i64>>,
    end_times: Vec<Vec<i64>>,
    machine_predecessors: Vec<Vec<Option<Operation>>>,
    makespan: i64,
}

#[derive(Deserialize)]
struct RawSchedule {
    start_times: Vec<Vec<i64>>,
    end_times: Vec<Vec<i64>>,
    machine_predecessors: Vec<Vec<Option<Operation>>>,
    makespan: i64,
}

/// Returned when a deserialized schedule is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed schedule: {0}")]
pub struct MalformedSchedule(&'static str);

fn is_rectangular<T>(table: &[Vec<T>], rows: usize, cols: usize) -> bool {
    table.len() == rows && table.iter().all(|row| row.len() == cols)
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = MalformedSchedule;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        let num_jobs = raw.start_times.len();
        let num_tasks = raw.start_times.first().map_or(0, Vec::len);
        if !is_rectangular(&raw.start_times, num_jobs, num_tasks)
            || !is_rectangular(&raw.end_times, num_jobs, num_tasks)
            || !is_rectangular(&raw.machine_predecessors, num_jobs, num_tasks)
        {
            return Err(MalformedSchedule("time tables differ in shape"));
        }
        let in_range = |op: &Operation| op.job < num_jobs && op.task < num_tasks;
        if !raw
            .machine_predecessors
            .iter()
            .flatten()
            .flatten()
            .all(in_range)
        {
            return Err(MalformedSchedule("machine predecessor out of range"));
        }

        let schedule = Schedule::from_parts(raw.start_times, raw.end_times, raw.machine_predecessors);
        if schedule.makespan != raw.makespan {
            return Err(MalformedSchedule("makespan does not match end times"));
        }
        Ok(schedule)
    }
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Operation starting too early.
    pub operation: Operation,
    /// Human-readable description.
    pub message: String,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Operation started before its job predecessor finished.
    PrecedenceViolation,
    /// Two operations overlap on the same machine.
    MachineOverlap,
}

impl Schedule {
    pub(crate) fn from_parts(
        start_times: Vec<Vec<i64>>,
        end_times: Vec<Vec<i64>>,
        machine_predecessors: Vec<Vec<Option<Operation>>>,
    ) -> Self {
        let makespan = end_times
            .iter()
            .flat_map(|job| job.iter().copied())
            .max()
            .unwrap_or(0);
        Self {
            start_times,
            end_times,
            machine_predecessors,
            makespan,
        }
    }

    /// Makespan: latest end time across all operations.
    #[inline]
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Start time of an operation.
    #[inline]
    pub fn start_time(&self, op: Operation) -> i64 {
        self.start_times[op.job][op.task]
    }

    /// End time of an operation.
    #[inline]
    pub fn end_time(&self, op: Operation) -> i64 {
        self.end_times[op.job][op.task]
    }

    /// Operation processed right before `op` on its machine, if any.
    #[inline]
    pub fn machine_predecessor(&self, op: Operation) -> Option<Operation> {
        self.machine_predecessors[op.job][op.task]
    }

    /// A longest chain of operations ending at the makespan.
    ///
    /// Starts from the first operation (job-major) that ends at the makespan
    /// and walks backwards through tight predecessors, preferring the job
    /// predecessor over the machine predecessor, until an operation starting
    /// at time zero is reached. Returned in execution order.
    pub fn critical_path(&self) -> Vec<Operation> {
        let Some(last) = self.last_operation() else {
            return Vec::new();
        };

        let mut path = vec![last];
        let mut current = last;
        while self.start_time(current) > 0 {
            let start = self.start_time(current);
            let tight = |op: &Operation| self.end_time(*op) == start;
            let predecessor = current
                .job_predecessor()
                .filter(tight)
                .or_else(|| self.machine_predecessor(current).filter(tight));
            match predecessor {
                Some(op) => {
                    path.push(op);
                    current = op;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Checks job precedence and machine exclusivity against an instance.
    ///
    /// A schedule derived from a feasible ordering never violates either.
    pub fn violations(&self, instance: &Instance) -> Vec<Violation> {
        let mut violations = Vec::new();

        for op in instance.operations() {
            if let Some(pred) = op.job_predecessor() {
                if self.start_time(op) < self.end_time(pred) {
                    violations.push(Violation {
                        violation_type: ViolationType::PrecedenceViolation,
                        operation: op,
                        message: format!(
                            "{op} starts at {} before {pred} ends at {}",
                            self.start_time(op),
                            self.end_time(pred)
                        ),
                    });
                }
            }
        }

        for machine in 0..instance.num_machines() {
            let mut ops: Vec<Operation> = (0..instance.num_jobs())
                .map(|job| instance.operation_on_machine(job, machine))
                .collect();
            ops.sort_by_key(|&op| (self.start_time(op), self.end_time(op)));
            for pair in ops.windows(2) {
                if self.start_time(pair[1]) < self.end_time(pair[0]) {
                    violations.push(Violation {
                        violation_type: ViolationType::MachineOverlap,
                        operation: pair[1],
                        message: format!(
                            "{} overlaps {} on machine {machine}",
                            pair[1], pair[0]
                        ),
                    });
                }
            }
        }

        violations
    }

    /// Whether the schedule satisfies all constraints of `instance`.
    pub fn is_valid(&self, instance: &Instance) -> bool {
        self.violations(instance).is_empty()
    }

    fn last_operation(&self) -> Option<Operation> {
        self.end_times
            .iter()
            .enumerate()
            .flat_map(|(job, ends)| {
                ends.iter()
                    .enumerate()
                    .map(move |(task, &end)| (Operation::new(job, task), end))
            })
            .find(|&(_, end)| end == self.makespan)
            .map(|(op, _)| op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Job 0: M0(0..3) → M1(3..5); job 1: M1(0..2) → M0(3..6).
    fn sample_schedule() -> Schedule {
        Schedule::from_parts(
            vec![vec![0, 3], vec![0, 3]],
            vec![vec![3, 5], vec![2, 6]],
            vec![
                vec![None, Some(Operation::new(1, 0))],
                vec![None, Some(Operation::new(0, 0))],
            ],
        )
    }

    fn two_by_two() -> Instance {
        Instance::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]]).unwrap()
    }

    #[test]
    fn test_makespan() {
        assert_eq!(sample_schedule().makespan(), 6);
    }

    #[test]
    fn test_times() {
        let s = sample_schedule();
        assert_eq!(s.start_time(Operation::new(1, 1)), 3);
        assert_eq!(s.end_time(Operation::new(0, 1)), 5);
    }

    #[test]
    fn test_critical_path_follows_machine_edge() {
        // (1, 1) starts at 3; its job predecessor ends at 2, machine predecessor at 3.
        let path = sample_schedule().critical_path();
        assert_eq!(path, vec![Operation::new(0, 0), Operation::new(1, 1)]);
    }

    #[test]
    fn test_critical_path_prefers_job_edge() {
        // Both predecessors of (1, 1) end at 3.
        let s = Schedule::from_parts(
            vec![vec![0, 3], vec![0, 3]],
            vec![vec![3, 5], vec![3, 6]],
            vec![
                vec![None, Some(Operation::new(1, 0))],
                vec![None, Some(Operation::new(0, 0))],
            ],
        );
        assert_eq!(
            s.critical_path(),
            vec![Operation::new(1, 0), Operation::new(1, 1)]
        );
    }

    #[test]
    fn test_critical_path_length_matches_makespan() {
        let s = sample_schedule();
        let path = s.critical_path();
        assert_eq!(s.start_time(path[0]), 0);
        assert_eq!(s.end_time(*path.last().unwrap()), s.makespan());
    }

    #[test]
    fn test_valid_schedule() {
        assert!(sample_schedule().is_valid(&two_by_two()));
    }

    #[test]
    fn test_violations_detected() {
        // (1, 1) on M0 starts at 1, overlapping (0, 0) and before (1, 0) ends.
        let s = Schedule::from_parts(
            vec![vec![0, 3], vec![0, 1]],
            vec![vec![3, 5], vec![2, 4]],
            vec![vec![None, None], vec![None, None]],
        );
        let violations = s.violations(&two_by_two());
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::PrecedenceViolation
                && v.operation == Operation::new(1, 1)));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::MachineOverlap));
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::from_parts(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(s.makespan(), 0);
        assert!(s.critical_path().is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = sample_schedule();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(serde_json::from_str::<Schedule>(&json).unwrap(), s);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        let ragged = r#"{"start_times":[[0,3],[0]],"end_times":[[3,5],[2,6]],
            "machine_predecessors":[[null,null],[null,null]],"makespan":6}"#;
        assert!(serde_json::from_str::<Schedule>(ragged).is_err());

        let dangling = r#"{"start_times":[[0]],"end_times":[[1]],
            "machine_predecessors":[[{"job":4,"task":0}]],"makespan":1}"#;
        assert!(serde_json::from_str::<Schedule>(dangling).is_err());

        let wrong_makespan = r#"{"start_times":[[0]],"end_times":[[1]],
            "machine_predecessors":[[null]],"makespan":9}"#;
        let err = serde_json::from_str::<Schedule>(wrong_makespan).unwrap_err();
        assert!(err.to_string().contains("makespan"));
    }
}
