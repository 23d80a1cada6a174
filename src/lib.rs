//! Multi-group academic timetable generator paired with a time-windowed
//! attendance capture engine.
//!
//! [`CoreEngine`] is the single entry point: it wires a [`Repository`]
//! implementation to the feasibility analyser, the constraint-satisfaction
//! scheduler, the class-instance materialiser, and the attendance engine.
//! Everything the core needs from the outside world goes through that one
//! trait; no storage crate is imported here directly.

pub mod attendance;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod materialiser;
pub mod repository;
pub mod scheduler;
pub mod types;

pub use engine::CoreEngine;
pub use error::{CoreError, Result, UnschedulableReason};
pub use repository::{InMemoryRepository, Repository};
pub use scheduler::RegenerateReport;
