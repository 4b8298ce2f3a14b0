//! Tabu Search over critical-block swaps.
//!
//! # Algorithm
//!
//! 1. Build a starting ordering with greedy EST_SPT
//! 2. At each iteration:
//!    a. Generate the boundary swaps of the current ordering's critical blocks
//!    b. Apply every non-tabu swap in turn, each to a copy of the current
//!       ordering, and forbid it for `tabu_tenure` iterations
//!    c. Every feasible candidate becomes the current ordering
//!    d. Update the global best if improved
//! 3. Terminate after `max_iterations` or when the deadline passes
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem", Management Science 42(6)

mod config;
mod memory;
mod solver;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use solver::TabuSolver;
