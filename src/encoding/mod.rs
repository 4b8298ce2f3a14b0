//! Solution encodings.
//!
//! Local search operates on the [`ResourceOrder`] encoding: one operation
//! sequence per machine. Schedules are always derived from it, never edited
//! directly.
//!
//! # Reference
//! Cheng, Gen & Tsujimura (1996), "A tutorial survey of job-shop scheduling
//! problems using genetic algorithms—I. Representation"

mod resource_order;

pub use resource_order::ResourceOrder;
