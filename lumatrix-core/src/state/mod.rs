//! Failure tracking and recovery classification
//!
//! One failure counter per subsystem plus a pure classification ladder.
//! The tracker never acts on anything: it records outcomes and answers
//! queries. Clearing caches, dropping sockets or restarting the process
//! is the scheduler's call, made after consulting the queries. That split
//! keeps detection testable apart from the recovery itself.

pub mod counter;
pub mod tracker;

pub use counter::{FailureCounter, RecoveryStage, Subsystem, SUBSYSTEM_COUNT};
pub use tracker::{ApiCallKind, ApiStats, StateTracker};
