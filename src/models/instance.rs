//! Job-shop problem instance.
//!
//! An instance fixes the number of jobs and machines and, for every
//! operation, the machine it runs on and its duration. Every job visits
//! every machine exactly once, so `num_tasks == num_machines` and each
//! machine processes exactly `num_jobs` operations.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Operation;
use crate::validation::{validate_jobs, ValidationErrors};

/// Immutable job-shop instance.
///
/// Operation data is stored in flat job-major arrays indexed by
/// `job * num_tasks + task`. Serialized as its per-job steps;
/// deserialization goes through [`Instance::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstanceData", into = "InstanceData")]
pub struct Instance {
    num_jobs: usize,
    num_machines: usize,
    num_tasks: usize,
    durations: Vec<i64>,
    machines: Vec<usize>,
    /// `job * num_machines + machine` → task index of that job on that machine.
    task_on_machine: Vec<usize>,
}

/// Serialized form of an [`Instance`].
#[derive(Serialize, Deserialize)]
struct InstanceData {
    num_machines: usize,
    jobs: Vec<Vec<(usize, i64)>>,
}

impl TryFrom<InstanceData> for Instance {
    type Error = ValidationErrors;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Instance::new(data.num_machines, data.jobs)
    }
}

impl From<Instance> for InstanceData {
    fn from(instance: Instance) -> Self {
        let jobs = (0..instance.num_jobs)
            .map(|job| {
                (0..instance.num_tasks)
                    .map(|task| {
                        let op = Operation::new(job, task);
                        (instance.machine(op), instance.duration(op))
                    })
                    .collect()
            })
            .collect();
        Self {
            num_machines: instance.num_machines,
            jobs,
        }
    }
}

impl Instance {
    /// Builds an instance from per-job `(machine, duration)` steps.
    ///
    /// # Errors
    /// Returns every structural problem found by
    /// [`validate_jobs`](crate::validation::validate_jobs).
    ///
    /// # Example
    /// ```
    /// use u_jobshop::models::{Instance, Operation};
    ///
    /// let instance = Instance::new(2, vec![
    ///     vec![(0, 3), (1, 2)],
    ///     vec![(1, 2), (0, 3)],
    /// ]).unwrap();
    /// assert_eq!(instance.num_jobs(), 2);
    /// assert_eq!(instance.machine(Operation::new(1, 0)), 1);
    /// ```
    pub fn new(num_machines: usize, jobs: Vec<Vec<(usize, i64)>>) -> Result<Self, ValidationErrors> {
        validate_jobs(num_machines, &jobs)?;

        let num_jobs = jobs.len();
        let num_tasks = num_machines;
        let mut durations = Vec::with_capacity(num_jobs * num_tasks);
        let mut machines = Vec::with_capacity(num_jobs * num_tasks);
        let mut task_on_machine = vec![0; num_jobs * num_machines];

        for (job, steps) in jobs.into_iter().enumerate() {
            for (task, (machine, duration)) in steps.into_iter().enumerate() {
                machines.push(machine);
                durations.push(duration);
                task_on_machine[job * num_machines + machine] = task;
            }
        }

        Ok(Self {
            num_jobs,
            num_machines,
            num_tasks,
            durations,
            machines,
            task_on_machine,
        })
    }

    /// Generates a random instance in the style of Taillard (1993).
    ///
    /// Each job visits the machines in a uniformly shuffled order, with
    /// durations drawn from `1..=max_duration`.
    pub fn random<R: Rng>(
        num_jobs: usize,
        num_machines: usize,
        max_duration: i64,
        rng: &mut R,
    ) -> Result<Self, ValidationErrors> {
        let max_duration = max_duration.max(1);
        let jobs = (0..num_jobs)
            .map(|_| {
                let mut route: Vec<usize> = (0..num_machines).collect();
                route.shuffle(rng);
                route
                    .into_iter()
                    .map(|machine| (machine, rng.random_range(1..=max_duration)))
                    .collect()
            })
            .collect();
        Self::new(num_machines, jobs)
    }

    /// Number of jobs.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.num_jobs
    }

    /// Number of machines.
    #[inline]
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Number of operations per job.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Total number of operations.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.num_jobs * self.num_tasks
    }

    /// Processing time of an operation.
    #[inline]
    pub fn duration(&self, op: Operation) -> i64 {
        self.durations[op.job * self.num_tasks + op.task]
    }

    /// Machine an operation runs on.
    #[inline]
    pub fn machine(&self, op: Operation) -> usize {
        self.machines[op.job * self.num_tasks + op.task]
    }

    /// Task index of `job` on `machine`.
    #[inline]
    pub fn task_on_machine(&self, job: usize, machine: usize) -> usize {
        self.task_on_machine[job * self.num_machines + machine]
    }

    /// The operation of `job` that runs on `machine`.
    #[inline]
    pub fn operation_on_machine(&self, job: usize, machine: usize) -> Operation {
        Operation::new(job, self.task_on_machine(job, machine))
    }

    /// Sum of all processing times of `job`.
    pub fn total_duration(&self, job: usize) -> i64 {
        let start = job * self.num_tasks;
        self.durations[start..start + self.num_tasks].iter().sum()
    }

    /// Iterates over all operations, job-major.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        (0..self.num_jobs)
            .flat_map(move |job| (0..self.num_tasks).map(move |task| Operation::new(job, task)))
    }

    /// Largest total machine load; a lower bound on the makespan.
    pub fn machine_load_bound(&self) -> i64 {
        let mut load = vec![0i64; self.num_machines];
        for op in self.operations() {
            load[self.machine(op)] += self.duration(op);
        }
        load.into_iter().max().unwrap_or(0)
    }

    /// Longest job; a lower bound on the makespan.
    pub fn job_length_bound(&self) -> i64 {
        (0..self.num_jobs)
            .map(|job| self.total_duration(job))
            .max()
            .unwrap_or(0)
    }
}
