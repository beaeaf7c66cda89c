use serde::Deserialize;
use std::str::FromStr;

/// Which decoder turns captured command output into events.
///
/// - `Plain`: the whole output becomes one event's `message` (default).
/// - `Lines`: one event per non-empty output line.
/// - `Json`: the output is parsed as JSON (object, array or scalar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Plain,
    Lines,
    Json,
}

impl Default for CodecKind {
    fn default() -> Self {
        CodecKind::Plain
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(CodecKind::Plain),
            "lines" => Ok(CodecKind::Lines),
            "json" => Ok(CodecKind::Json),
            other => Err(format!(
                "invalid codec: {other} (expected \"plain\", \"lines\" or \"json\")"
            )),
        }
    }
}

/// Field-naming strategy for event annotations.
///
/// - `Disabled`: legacy flat paths (`host`, `command`, `[@metadata][...]`).
/// - `V1`: ECS-style nested paths (`[host][name]`, `[process][...]`).
/// - `V8`: accepted for forward compatibility; behaves exactly like `V1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcsCompatibility {
    Disabled,
    V1,
    V8,
}

impl Default for EcsCompatibility {
    fn default() -> Self {
        EcsCompatibility::Disabled
    }
}

impl FromStr for EcsCompatibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" => Ok(EcsCompatibility::Disabled),
            "v1" => Ok(EcsCompatibility::V1),
            "v8" => Ok(EcsCompatibility::V8),
            other => Err(format!(
                "invalid ecs_compatibility: {other} (expected \"disabled\", \"v1\" or \"v8\")"
            )),
        }
    }
}
