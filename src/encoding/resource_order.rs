//! Resource-order (machine permutation) encoding.
//!
//! # Encoding
//!
//! For every machine, the sequence in which it processes its operations.
//! A complete ordering holds exactly `num_jobs` operations per machine and
//! every operation of the instance exactly once. An ordering may still be
//! infeasible: machine sequences that contradict job precedence form a
//! cycle, which is only discovered when converting to a schedule.
//!
//! ```text
//! machine 0 : (0,1) (1,2) (2,2)
//! machine 1 : (0,2) (2,1) (1,1)
//! ```
//!
//! # Reference
//! Błażewicz, Domschke & Pesch (1996), "The job shop scheduling problem:
//! Conventional and new solution techniques", EJOR 93(1)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Instance, Operation, Schedule};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Per-machine operation sequences.
///
/// Cloning yields an independent deep copy; search drivers copy before
/// every mutation.
///
/// Deserialization checks that no machine holds more than `num_jobs`
/// operations and that no operation appears twice. Consistency with a
/// particular instance is only established by [`Self::from_sequences`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawResourceOrder")]
pub struct ResourceOrder {
    num_jobs: usize,
    tasks_by_machine: Vec<Vec<Operation>>,
}

#[derive(Deserialize)]
struct RawResourceOrder {
    num_jobs: usize,
    tasks_by_machine: Vec<Vec<Operation>>,
}

impl TryFrom<RawResourceOrder> for ResourceOrder {
    type Error = ValidationError;

    fn try_from(raw: RawResourceOrder) -> Result<Self, Self::Error> {
        let invalid =
            |message: String| ValidationError::new(ValidationErrorKind::InvalidOrdering, message);

        let mut seen = HashSet::new();
        for (machine, sequence) in raw.tasks_by_machine.iter().enumerate() {
            if sequence.len() > raw.num_jobs {
                return Err(invalid(format!(
                    "Machine {machine} holds {} operations, at most {} allowed",
                    sequence.len(),
                    raw.num_jobs
                )));
            }
            for &op in sequence {
                if op.job >= raw.num_jobs {
                    return Err(invalid(format!("Unknown operation {op}")));
                }
                if !seen.insert(op) {
                    return Err(invalid(format!("{op} appears more than once")));
                }
            }
        }

        Ok(Self {
            num_jobs: raw.num_jobs,
            tasks_by_machine: raw.tasks_by_machine,
        })
    }
}

impl ResourceOrder {
    /// Creates an empty ordering for `instance`.
    pub fn new(instance: &Instance) -> Self {
        Self {
            num_jobs: instance.num_jobs(),
            tasks_by_machine: (0..instance.num_machines())
                .map(|_| Vec::with_capacity(instance.num_jobs()))
                .collect(),
        }
    }

    /// Builds an ordering from explicit machine sequences.
    ///
    /// # Errors
    /// Fails with [`ValidationErrorKind::InvalidOrdering`] if the sequences
    /// do not hold every operation exactly once on its own machine.
    pub fn from_sequences(
        instance: &Instance,
        sequences: Vec<Vec<Operation>>,
    ) -> Result<Self, ValidationError> {
        let invalid =
            |message: String| ValidationError::new(ValidationErrorKind::InvalidOrdering, message);

        if sequences.len() != instance.num_machines() {
            return Err(invalid(format!(
                "Expected {} machine sequences, got {}",
                instance.num_machines(),
                sequences.len()
            )));
        }

        let mut seen = vec![false; instance.num_operations()];
        for (machine, sequence) in sequences.iter().enumerate() {
            if sequence.len() != instance.num_jobs() {
                return Err(invalid(format!(
                    "Machine {machine} holds {} operations, expected {}",
                    sequence.len(),
                    instance.num_jobs()
                )));
            }
            for &op in sequence {
                if op.job >= instance.num_jobs() || op.task >= instance.num_tasks() {
                    return Err(invalid(format!("Unknown operation {op}")));
                }
                if instance.machine(op) != machine {
                    return Err(invalid(format!(
                        "{op} runs on machine {}, not {machine}",
                        instance.machine(op)
                    )));
                }
                let slot = &mut seen[op.job * instance.num_tasks() + op.task];
                if *slot {
                    return Err(invalid(format!("{op} appears more than once")));
                }
                *slot = true;
            }
        }

        Ok(Self {
            num_jobs: instance.num_jobs(),
            tasks_by_machine: sequences,
        })
    }

    /// Derives the ordering realized by a schedule.
    ///
    /// Each machine's sequence follows the schedule's machine-predecessor
    /// chain, so operations sharing a start time (zero durations) keep
    /// their order. A machine whose chain is broken falls back to sorting
    /// by start time, then end time, then job index.
    pub fn from_schedule(instance: &Instance, schedule: &Schedule) -> Self {
        let tasks_by_machine = (0..instance.num_machines())
            .map(|machine| {
                let ops: Vec<Operation> = (0..instance.num_jobs())
                    .map(|job| instance.operation_on_machine(job, machine))
                    .collect();
                machine_chain(schedule, &ops).unwrap_or_else(|| {
                    let mut sorted = ops;
                    sorted.sort_by_key(|&op| {
                        (schedule.start_time(op), schedule.end_time(op), op.job)
                    });
                    sorted
                })
            })
            .collect();
        Self {
            num_jobs: instance.num_jobs(),
            tasks_by_machine,
        }
    }

    /// Number of machines.
    #[inline]
    pub fn num_machines(&self) -> usize {
        self.tasks_by_machine.len()
    }

    /// Processing order of one machine.
    #[inline]
    pub fn machine_sequence(&self, machine: usize) -> &[Operation] {
        &self.tasks_by_machine[machine]
    }

    /// Appends `op` at the next free slot of `machine`.
    pub fn push(&mut self, machine: usize, op: Operation) {
        debug_assert!(self.tasks_by_machine[machine].len() < self.num_jobs);
        self.tasks_by_machine[machine].push(op);
    }

    /// Position of `op` in `machine`'s sequence (linear scan).
    pub fn position_of(&self, machine: usize, op: Operation) -> Option<usize> {
        self.tasks_by_machine[machine].iter().position(|&o| o == op)
    }

    /// Exchanges the operations at positions `i` and `j` on `machine`.
    #[inline]
    pub fn swap(&mut self, machine: usize, i: usize, j: usize) {
        self.tasks_by_machine[machine].swap(i, j);
    }

    /// Whether every machine holds all `num_jobs` operations.
    pub fn is_complete(&self) -> bool {
        self.tasks_by_machine
            .iter()
            .all(|sequence| sequence.len() == self.num_jobs)
    }

    /// Number of operations placed so far.
    pub fn len(&self) -> usize {
        self.tasks_by_machine.iter().map(Vec::len).sum()
    }

    /// Whether no operation has been placed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes semi-active start times for this ordering.
    ///
    /// Every operation starts as soon as both its job predecessor and its
    /// machine predecessor have finished.
    ///
    /// # Returns
    /// `None` if the ordering is incomplete, contains a precedence cycle,
    /// or does not match the dimensions of `instance`.
    ///
    /// # Complexity
    /// O(n · m) per pass over the machines; at most n · m passes, but a
    /// feasible ordering typically needs only a few.
    pub fn to_schedule(&self, instance: &Instance) -> Option<Schedule> {
        if !self.is_complete()
            || self.num_jobs != instance.num_jobs()
            || self.num_machines() != instance.num_machines()
        {
            return None;
        }

        let num_jobs = instance.num_jobs();
        let num_tasks = instance.num_tasks();
        let mut start_times = vec![vec![0i64; num_tasks]; num_jobs];
        let mut end_times = vec![vec![0i64; num_tasks]; num_jobs];
        let mut machine_predecessors = vec![vec![None; num_tasks]; num_jobs];

        let mut next_task = vec![0usize; num_jobs];
        let mut next_position = vec![0usize; self.num_machines()];
        let mut job_ready = vec![0i64; num_jobs];
        let mut machine_ready = vec![0i64; self.num_machines()];
        let mut machine_last: Vec<Option<Operation>> = vec![None; self.num_machines()];

        let mut remaining = instance.num_operations();
        while remaining > 0 {
            let mut progressed = false;

            for (machine, sequence) in self.tasks_by_machine.iter().enumerate() {
                while let Some(&op) = sequence.get(next_position[machine]) {
                    if op.task >= num_tasks {
                        return None;
                    }
                    if next_task[op.job] != op.task {
                        break;
                    }
                    let start = job_ready[op.job].max(machine_ready[machine]);
                    let end = start + instance.duration(op);
                    start_times[op.job][op.task] = start;
                    end_times[op.job][op.task] = end;
                    machine_predecessors[op.job][op.task] = machine_last[machine];

                    job_ready[op.job] = end;
                    machine_ready[machine] = end;
                    machine_last[machine] = Some(op);
                    next_task[op.job] += 1;
                    next_position[machine] += 1;
                    remaining -= 1;
                    progressed = true;
                }
            }

            if !progressed {
                return None;
            }
        }

        Some(Schedule::from_parts(
            start_times,
            end_times,
            machine_predecessors,
        ))
    }
}

/// Orders `ops` (one per job, all on one machine) along the schedule's
/// machine-predecessor links. `None` unless the links form a single chain.
fn machine_chain(schedule: &Schedule, ops: &[Operation]) -> Option<Vec<Operation>> {
    let mut successor: Vec<Option<Operation>> = vec![None; ops.len()];
    let mut head = None;
    for &op in ops {
        match schedule.machine_predecessor(op) {
            None if head.is_none() => head = Some(op),
            None => return None,
            Some(pred) => {
                if !ops.contains(&pred) {
                    return None;
                }
                let slot = successor.get_mut(pred.job)?;
                if slot.is_some() {
                    return None;
                }
                *slot = Some(op);
            }
        }
    }

    let mut chain = Vec::with_capacity(ops.len());
    let mut next = head;
    while let Some(op) = next {
        if chain.len() == ops.len() {
            return None;
        }
        chain.push(op);
        next = successor[op.job];
    }
    (chain.len() == ops.len()).then_some(chain)
}
