//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Time-based**: SPT, LRPT
//! - **Start-based**: EST
//! - **Index-based**: JOB (lowest job index)
//!
//! [`PriorityRule`] names the four compositions used for greedy
//! construction: SPT, LRPT, EST_SPT and EST_LRPT.
//!
//! # Score Convention
//! All rules return lower scores for higher priority operations.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DispatchState, DispatchingRule, RuleEngine, RuleScore};
use crate::models::{Instance, Operation};

// ======================== Time-based rules ========================

/// Shortest Processing Time.
///
/// Prioritizes the operation with the shortest duration.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, op: Operation, instance: &Instance, _state: &DispatchState) -> RuleScore {
        instance.duration(op)
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Remaining Processing Time.
///
/// Prioritizes the operation whose job has the most undispatched work.
#[derive(Debug, Clone, Copy)]
pub struct Lrpt;

impl DispatchingRule for Lrpt {
    fn name(&self) -> &'static str {
        "LRPT"
    }

    fn evaluate(&self, op: Operation, _instance: &Instance, state: &DispatchState) -> RuleScore {
        -state.remaining[op.job]
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Processing Time"
    }
}

// ======================== Start-based rules ========================

/// Earliest Start Time.
///
/// Prioritizes the operation that could start soonest given the work
/// already dispatched on its job and its machine.
#[derive(Debug, Clone, Copy)]
pub struct Est;

impl DispatchingRule for Est {
    fn name(&self) -> &'static str {
        "EST"
    }

    fn evaluate(&self, op: Operation, instance: &Instance, state: &DispatchState) -> RuleScore {
        state.earliest_start(op, instance)
    }

    fn description(&self) -> &'static str {
        "Earliest Start Time"
    }
}

// ======================== Index-based rules ========================

/// Lowest job index.
///
/// Breaks ties deterministically regardless of ready-list order.
#[derive(Debug, Clone, Copy)]
pub struct JobIndex;

impl DispatchingRule for JobIndex {
    fn name(&self) -> &'static str {
        "JOB"
    }

    fn evaluate(&self, op: Operation, _instance: &Instance, _state: &DispatchState) -> RuleScore {
        op.job as RuleScore
    }

    fn description(&self) -> &'static str {
        "Lowest Job Index"
    }
}

// ======================== Compositions ========================

/// Priority rule used by greedy construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityRule {
    /// Shortest processing time.
    Spt,
    /// Longest remaining processing time, ties by lowest job index.
    Lrpt,
    /// Earliest start, ties by shortest processing time.
    EstSpt,
    /// Earliest start, ties by longest remaining processing time.
    EstLrpt,
}

impl PriorityRule {
    /// All rules, in declaration order.
    pub const ALL: [PriorityRule; 4] = [
        PriorityRule::Spt,
        PriorityRule::Lrpt,
        PriorityRule::EstSpt,
        PriorityRule::EstLrpt,
    ];

    /// Canonical upper-case name.
    pub fn name(self) -> &'static str {
        match self {
            PriorityRule::Spt => "SPT",
            PriorityRule::Lrpt => "LRPT",
            PriorityRule::EstSpt => "EST_SPT",
            PriorityRule::EstLrpt => "EST_LRPT",
        }
    }

    /// Builds the rule engine realizing this priority.
    pub fn engine(self) -> RuleEngine {
        match self {
            PriorityRule::Spt => RuleEngine::new().with_rule(Spt),
            PriorityRule::Lrpt => RuleEngine::new().with_rule(Lrpt).with_tie_breaker(JobIndex),
            PriorityRule::EstSpt => RuleEngine::new().with_rule(Est).with_tie_breaker(Spt),
            PriorityRule::EstLrpt => RuleEngine::new().with_rule(Est).with_tie_breaker(Lrpt),
        }
    }
}

impl fmt::Display for PriorityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unrecognized priority rule name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority rule '{0}' (expected SPT, LRPT, EST_SPT or EST_LRPT)")]
pub struct UnknownPriorityRule(pub String);

impl FromStr for PriorityRule {
    type Err = UnknownPriorityRule;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        PriorityRule::ALL
            .into_iter()
            .find(|rule| rule.name() == normalized)
            .ok_or_else(|| UnknownPriorityRule(s.to_owned()))
    }
}
