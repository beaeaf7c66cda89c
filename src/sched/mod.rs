// src/sched/mod.rs

//! Scheduling layer: decides when each tick runs.
//!
//! - [`cron`] holds cron-expression helpers (field normalization, next-fire
//!   computation).
//! - [`driver`] owns the run loop: a fixed-interval loop with a stoppable
//!   sleep, or a single cron worker, plus the stop handshake.

pub mod cron;
pub mod driver;

pub use driver::{Driver, StopHandle};
