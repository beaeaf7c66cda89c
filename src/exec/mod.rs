// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns running the configured command with
//! `tokio::process::Command` and turning one capture into annotated events.
//!
//! - [`process`] holds the subprocess handle for exactly one execution and
//!   guarantees it is closed on every exit path, including a forced stop.
//! - [`executor`] performs one tick: run, decode, annotate, push.

pub mod executor;
pub mod process;

pub use executor::{RunExecutor, system_hostname};
pub use process::{Capture, ProcessError, ProcessRunner};
