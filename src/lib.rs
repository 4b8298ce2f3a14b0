//! Job-shop scheduling heuristics.
//!
//! Builds schedules for the classic job-shop problem (every job visits every
//! machine once, in a fixed order) and improves them by local search over
//! critical-path blocks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Operation`, `Schedule`, and the
//!   text instance loader
//! - **`encoding`**: `ResourceOrder`, the per-machine permutation encoding
//! - **`validation`**: Input integrity checks (job shape, machine refs, durations)
//! - **`dispatching`**: Priority rules (SPT, LRPT, EST) and the rule engine
//! - **`neighborhood`**: Critical blocks and their boundary swaps
//! - **`solver`**: Greedy construction, steepest descent, tabu search
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_jobshop::models::Instance;
//! use u_jobshop::solver::{Solver, TabuConfig, TabuSolver};
//!
//! let instance: Instance = "2 2\n0 3 1 2\n1 2 0 3".parse().unwrap();
//! let solver = TabuSolver::new(TabuConfig::default().with_max_iterations(50));
//! let solution = solver.solve(&instance, Duration::from_secs(1)).unwrap();
//! assert_eq!(solution.makespan(), Some(6));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job Shop Problem"
//! - Błażewicz et al. (1996), "The job shop scheduling problem: Conventional and new solution techniques"

pub mod dispatching;
pub mod encoding;
pub mod models;
pub mod neighborhood;
pub mod solver;
pub mod validation;
