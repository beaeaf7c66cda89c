// src/config/model.rs

use std::fmt;
use std::time::Duration;

use cron::Schedule;
use serde::Deserialize;

use crate::types::{CodecKind, EcsCompatibility};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [input]
/// command = "uptime"
/// interval = 10
/// codec = "plain"
/// ecs_compatibility = "v1"
/// ```
///
/// Exactly one of `interval` / `schedule` must be set; this is checked by
/// validation, not by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// The `[input]` section describing what to run and when.
    pub input: RawInputSection,
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInputSection {
    /// The shell command to execute, e.g. `"uptime"`.
    pub command: String,

    /// Interval between runs, in seconds. Fractional values are allowed.
    #[serde(default)]
    pub interval: Option<f64>,

    /// Cron expression deciding when to run (5- or 6-field).
    #[serde(default)]
    pub schedule: Option<String>,

    /// Decoder for the captured output.
    #[serde(default)]
    pub codec: CodecKind,

    /// Field-naming strategy for event annotations.
    #[serde(default)]
    pub ecs_compatibility: EcsCompatibility,
}

/// When to invoke a run, resolved from a validated config.
#[derive(Clone)]
pub enum RunMode {
    /// Fixed-interval loop with a stoppable sleep between ticks.
    Interval(Duration),
    /// Cron-triggered, serialized on a single worker.
    ///
    /// `expression` is the normalized 6-field source, kept for logs.
    Schedule {
        expression: String,
        schedule: Schedule,
    },
}

impl fmt::Debug for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Interval(d) => f.debug_tuple("Interval").field(d).finish(),
            RunMode::Schedule { expression, .. } => {
                f.debug_tuple("Schedule").field(expression).finish()
            }
        }
    }
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawConfigFile>` in [`super::validate`]; by the
/// time a `ConfigFile` exists the command is non-empty and the run mode is
/// fully typed (interval converted to a `Duration`, cron expression parsed).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub command: String,
    pub mode: RunMode,
    pub codec: CodecKind,
    pub ecs_compatibility: EcsCompatibility,
}

impl ConfigFile {
    /// Internal constructor used by validation. Does not re-check anything.
    pub(crate) fn new_unchecked(
        command: String,
        mode: RunMode,
        codec: CodecKind,
        ecs_compatibility: EcsCompatibility,
    ) -> Self {
        Self {
            command,
            mode,
            codec,
            ecs_compatibility,
        }
    }
}
