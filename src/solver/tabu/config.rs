//! Tabu Search configuration.

use serde::{Deserialize, Serialize};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_jobshop::solver::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(7);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_tenure, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many iterations an applied swap stays forbidden.
    pub tabu_tenure: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tabu_tenure: 2,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure (number of iterations a swap remains tabu).
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }
}
