//! Input validation for job-shop instances.
//!
//! Checks structural integrity of the job descriptions before an
//! [`Instance`](crate::models::Instance) is built. Detects:
//! - Instances without jobs or machines
//! - Jobs whose operation count differs from the machine count
//! - Machine references outside `0..num_machines`
//! - Jobs visiting the same machine twice
//! - Negative durations
//!
//! The solvers assume every job visits every machine exactly once, so that
//! each machine processes exactly `num_jobs` operations.

use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), ValidationErrors>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs or no machines.
    EmptyInstance,
    /// A job does not have exactly one operation per machine.
    OperationCountMismatch,
    /// An operation references a machine that doesn't exist.
    InvalidMachineReference,
    /// A job visits the same machine more than once.
    DuplicateMachine,
    /// An operation has a negative duration.
    NegativeDuration,
    /// A machine sequence does not match the instance.
    InvalidOrdering,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// All errors detected in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    /// Detected errors, in discovery order.
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Whether any error of the given kind was detected.
    pub fn contains(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    messages.join("; ")
}

/// Validates job descriptions given as `(machine, duration)` steps.
///
/// Checks:
/// 1. At least one job and one machine
/// 2. Every job has exactly `num_machines` operations
/// 3. All machine references are in range
/// 4. No job visits a machine twice
/// 5. No duration is negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(num_machines: usize, jobs: &[Vec<(usize, i64)>]) -> ValidationResult {
    let mut errors = Vec::new();

    if jobs.is_empty() || num_machines == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            format!(
                "Instance needs at least one job and one machine (jobs={}, machines={num_machines})",
                jobs.len()
            ),
        ));
    }

    for (job, steps) in jobs.iter().enumerate() {
        if steps.len() != num_machines {
            errors.push(ValidationError::new(
                ValidationErrorKind::OperationCountMismatch,
                format!(
                    "Job {job} has {} operations, expected {num_machines}",
                    steps.len()
                ),
            ));
        }

        let mut seen = HashSet::new();
        for (task, &(machine, duration)) in steps.iter().enumerate() {
            if machine >= num_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachineReference,
                    format!("Operation ({job}, {task}) references unknown machine {machine}"),
                ));
            } else if !seen.insert(machine) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMachine,
                    format!("Job {job} visits machine {machine} more than once"),
                ));
            }

            if duration < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!("Operation ({job}, {task}) has negative duration {duration}"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}
