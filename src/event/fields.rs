// src/event/fields.rs

//! Annotation field paths per naming strategy.

use crate::types::EcsCompatibility;

use super::FieldPath;

/// Concrete field paths for the execution-metadata annotations.
///
/// Resolved once at setup, before the scheduling loop starts; the executor
/// only ever works with ready-made paths. The two elapsed-time variants are
/// optional: which of them is written depends on the naming strategy, but
/// the executor always computes both representations.
#[derive(Debug, Clone)]
pub struct AnnotationFields {
    /// Host the command ran on; written only if the decoder didn't set it.
    pub host_name: FieldPath,
    /// The literal configured command string.
    pub command_line: FieldPath,
    /// Exit code of the process, when one was observed.
    pub exit_code: FieldPath,
    /// Elapsed wall time as a whole number of nanoseconds.
    pub elapsed_time_nanos: Option<FieldPath>,
    /// Elapsed wall time as legacy fractional seconds.
    pub legacy_duration_secs: Option<FieldPath>,
}

impl AnnotationFields {
    pub fn resolve(mode: EcsCompatibility) -> Self {
        match mode {
            EcsCompatibility::Disabled => Self {
                host_name: FieldPath::from_segments(["host"]),
                command_line: FieldPath::from_segments(["command"]),
                exit_code: FieldPath::from_segments(["@metadata", "exit_status"]),
                elapsed_time_nanos: None,
                legacy_duration_secs: Some(FieldPath::from_segments(["@metadata", "duration"])),
            },
            // v8 is an alias for v1.
            EcsCompatibility::V1 | EcsCompatibility::V8 => Self {
                host_name: FieldPath::from_segments(["host", "name"]),
                command_line: FieldPath::from_segments(["process", "command_line"]),
                exit_code: FieldPath::from_segments(["process", "exit_code"]),
                elapsed_time_nanos: Some(FieldPath::from_segments([
                    "@metadata",
                    "tickrun",
                    "process",
                    "elapsed_time",
                ])),
                legacy_duration_secs: None,
            },
        }
    }
}
