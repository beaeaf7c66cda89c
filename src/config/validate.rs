// src/config/validate.rs

use std::str::FromStr;
use std::time::Duration;

use cron::Schedule;

use crate::config::model::{ConfigFile, RawConfigFile, RawInputSection, RunMode};
use crate::errors::{Result, TickrunError};
use crate::sched::cron::normalize_cron;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TickrunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let command = validate_command(&raw.input)?;
        let mode = validate_run_mode(&raw.input)?;
        Ok(ConfigFile::new_unchecked(
            command,
            mode,
            raw.input.codec,
            raw.input.ecs_compatibility,
        ))
    }
}

fn validate_command(input: &RawInputSection) -> Result<String> {
    let command = input.command.trim();
    if command.is_empty() {
        return Err(TickrunError::ConfigError(
            "[input].command must be a non-empty string".to_string(),
        ));
    }
    Ok(command.to_string())
}

fn validate_run_mode(input: &RawInputSection) -> Result<RunMode> {
    match (input.interval, input.schedule.as_deref()) {
        (Some(_), Some(_)) | (None, None) => Err(TickrunError::ConfigError(
            "exactly one of [input].interval or [input].schedule must be set".to_string(),
        )),
        (Some(secs), None) => interval_mode(secs),
        (None, Some(expr)) => schedule_mode(expr),
    }
}

fn interval_mode(secs: f64) -> Result<RunMode> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(TickrunError::ConfigError(format!(
            "[input].interval must be a positive number of seconds (got {secs})"
        )));
    }

    let duration = Duration::try_from_secs_f64(secs)
        .map_err(|e| TickrunError::ConfigError(format!("[input].interval is out of range: {e}")))?;

    Ok(RunMode::Interval(duration))
}

fn schedule_mode(expr: &str) -> Result<RunMode> {
    // The `cron` crate wants 6 fields (with seconds); user configs may use
    // standard 5-field expressions.
    let normalized = normalize_cron(expr);

    let schedule = Schedule::from_str(&normalized)
        .map_err(|e| TickrunError::ConfigError(format!("invalid cron expression '{expr}': {e}")))?;

    Ok(RunMode::Schedule {
        expression: normalized,
        schedule,
    })
}
