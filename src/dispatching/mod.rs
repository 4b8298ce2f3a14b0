//! Dispatching rules and rule engine for greedy construction.
//!
//! Provides operation-level priority rules (SPT, LRPT, EST) and a
//! sequential rule engine that picks the next operation to dispatch from
//! the set of currently ready operations.
//!
//! # Usage
//!
//! ```
//! use u_jobshop::dispatching::{rules, DispatchState, RuleEngine};
//! use u_jobshop::models::{Instance, Operation};
//!
//! let instance = Instance::new(2, vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 3)]]).unwrap();
//! let state = DispatchState::new(&instance);
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Est)
//!     .with_tie_breaker(rules::Spt);
//!
//! let ready = [Operation::new(0, 0), Operation::new(1, 0)];
//! assert_eq!(engine.select_best(&ready, &instance, &state), Some(1));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7.1
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;
mod state;

pub use engine::RuleEngine;
pub use rules::{PriorityRule, UnknownPriorityRule};
pub use state::DispatchState;

use crate::models::{Instance, Operation};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates operation priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules must be pure functions of the
/// operation, the instance, and the explicit dispatch state.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a ready operation.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, op: Operation, instance: &Instance, state: &DispatchState) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
