//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules lexicographically: the primary rule decides,
//! later rules only break its ties. Complete ties go to the operation that
//! appears first in the ready list.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchState, DispatchingRule, RuleScore};
use crate::models::{Instance, Operation};

/// A composable rule engine for operation prioritization.
///
/// # Example
/// ```
/// use u_jobshop::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Est)
///     .with_tie_breaker(rules::Lrpt);
/// assert_eq!(engine.rule_names(), vec!["EST", "LRPT"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority operation.
    ///
    /// The first of several fully tied operations wins. `None` only when
    /// `ready` is empty.
    pub fn select_best(
        &self,
        ready: &[Operation],
        instance: &Instance,
        state: &DispatchState,
    ) -> Option<usize> {
        ready
            .iter()
            .enumerate()
            .min_by(|&(_, &a), &(_, &b)| self.compare(a, b, instance, state))
            .map(|(idx, _)| idx)
    }

    /// Evaluates a single operation and returns scores from each rule.
    pub fn evaluate(
        &self,
        op: Operation,
        instance: &Instance,
        state: &DispatchState,
    ) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(op, instance, state))
            .collect()
    }

    fn compare(
        &self,
        a: Operation,
        b: Operation,
        instance: &Instance,
        state: &DispatchState,
    ) -> Ordering {
        for rule in &self.rules {
            let ordering = rule
                .evaluate(a, instance, state)
                .cmp(&rule.evaluate(b, instance, state));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
