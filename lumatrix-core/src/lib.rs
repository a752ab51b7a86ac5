//! Board-agnostic decision core for the Lumatrix LED matrix display
//!
//! This crate contains all control logic that does not depend on specific
//! hardware, network or filesystem implementations:
//!
//! - Collaborator traits (renderer, network fetch, clock, logger, assets)
//! - Failure tracking and escalating recovery decisions
//! - Bounded FIFO caches for decoded images and text measurements
//! - Calendar event and scheduled-display resolution
//! - The per-cycle display scheduler
//!
//! Everything is sized with `heapless` containers and mutated only from
//! the single control-loop thread. The core never blocks and never
//! unwinds; collaborators report classified outcomes and the scheduler
//! decides what the next cycle looks like.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod cache;
pub mod calendar;
pub mod config;
pub mod scheduler;
pub mod state;
pub mod traits;
