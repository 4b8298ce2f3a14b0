//! Job-shop domain models.
//!
//! Provides the core data types for representing job-shop problems
//! and their solutions.
//!
//! # Domain Mappings
//!
//! | u-jobshop | Manufacturing | Computing |
//! |-----------|--------------|-----------|
//! | Job | Order / Part | Request |
//! | Operation | Routing step | Stage |
//! | Machine | Work center | Processor |
//! | Schedule | Production plan | Execution plan |

mod instance;
mod loader;
mod operation;
mod schedule;

pub use instance::Instance;
pub use loader::InstanceParseError;
pub use operation::Operation;
pub use schedule::{MalformedSchedule, Schedule, Violation, ViolationType};
