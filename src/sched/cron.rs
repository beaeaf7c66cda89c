// src/sched/cron.rs

//! Cron expression helpers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;

/// Normalize a 5-field cron expression to 6-field by prepending "0" for
/// the seconds column.
///
/// The `cron` crate requires 6 fields: `sec min hour day-of-month month
/// day-of-week`. Standard user configs use 5-field cron.
pub fn normalize_cron(expr: &str) -> String {
    let trimmed = expr.trim();
    let field_count = trimmed.split_whitespace().count();
    if field_count == 5 {
        format!("0 {trimmed}")
    } else {
        // Already 6-field or non-standard; pass through as-is.
        trimmed.to_string()
    }
}

/// The next fire instant strictly after `now`, if the schedule has one.
pub fn next_fire(schedule: &Schedule, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&now).next()
}

/// Sleep duration from `now` until `instant`; zero if the instant already
/// passed.
pub fn delay_until(instant: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (instant - now).to_std().unwrap_or(Duration::ZERO)
}
