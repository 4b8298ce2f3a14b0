//! Operation model.
//!
//! An operation is identified by its job and its position within that job.
//! It carries no data of its own; durations and machines are looked up
//! in the [`Instance`](super::Instance).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single operation: the `task`-th step of job `job`.
///
/// Two operations are equal when both indices are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operation {
    /// Job index (0-based).
    pub job: usize,
    /// Position within the job (0-based).
    pub task: usize,
}

impl Operation {
    /// Creates an operation identifier.
    #[inline]
    pub const fn new(job: usize, task: usize) -> Self {
        Self { job, task }
    }

    /// The operation preceding this one in the same job, if any.
    #[inline]
    pub fn job_predecessor(&self) -> Option<Operation> {
        self.task.checked_sub(1).map(|task| Operation::new(self.job, task))
    }

    /// The operation following this one in the same job.
    ///
    /// Does not check the job length.
    #[inline]
    pub fn job_successor(&self) -> Operation {
        Operation::new(self.job, self.task + 1)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.job, self.task)
    }
}
