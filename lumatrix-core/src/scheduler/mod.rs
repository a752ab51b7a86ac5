//! The per-cycle display scheduler
//!
//! Pure decision logic: given a clock reading and the outcomes reported
//! for earlier cycles, produce this cycle's directives. All hardware and
//! network effects happen outside, between cycles, and come back in as
//! classified outcomes.

pub mod content;
pub mod cycle;

pub use content::{select_content, CycleContent};
pub use cycle::{
    CycleDecision, CyclePlan, DisplayScheduler, FetchPlan, Maintenance, RestartKind, MAX_PLAYLIST,
};
