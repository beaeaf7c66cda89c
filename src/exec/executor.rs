// src/exec/executor.rs

//! One execution tick: run the command, decode, annotate, push.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tracing::{debug, error};

use crate::codec::Decoder;
use crate::event::AnnotationFields;
use crate::sink::EventSink;

use super::process::{Capture, ProcessRunner};

/// Performs one execution attempt per [`execute`](Self::execute) call.
///
/// Never fails: spawn, read and decode errors are logged and surface as
/// "no events this tick", and the elapsed time of the attempt is returned
/// either way so interval pacing stays based on real wall time.
pub struct RunExecutor {
    command: String,
    hostname: String,
    fields: AnnotationFields,
    decoder: Box<dyn Decoder>,
    sink: Box<dyn EventSink>,
    runner: Arc<ProcessRunner>,
}

impl RunExecutor {
    pub fn new(
        command: String,
        hostname: String,
        fields: AnnotationFields,
        decoder: Box<dyn Decoder>,
        sink: Box<dyn EventSink>,
        runner: Arc<ProcessRunner>,
    ) -> Self {
        Self {
            command,
            hostname,
            fields,
            decoder,
            sink,
            runner,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// One tick. Elapsed time spans the whole attempt, spawn through
    /// capture, and includes failed attempts.
    pub async fn execute(&self) -> Duration {
        let start = Instant::now();
        debug!(command = %self.command, "running command");

        let capture = match self.runner.run_once(&self.command).await {
            Ok(capture) => Some(capture),
            Err(err) => {
                error!(command = %self.command, error = %err, "error while running command");
                None
            }
        };

        let elapsed = start.elapsed();
        debug!(
            command = %self.command,
            duration_secs = elapsed.as_secs_f64(),
            "command completed"
        );

        if let Some(capture) = capture {
            self.emit_events(&capture, elapsed).await;
        }

        elapsed
    }

    /// Decode the capture and push enriched events to the sink.
    ///
    /// Host, command line and exit code respect values the decoder already
    /// set; the elapsed-time fields are always written when their path is
    /// configured.
    async fn emit_events(&self, capture: &Capture, elapsed: Duration) {
        let elapsed_nanos = elapsed.as_nanos() as u64;
        let elapsed_secs = elapsed.as_secs_f64();

        for item in self.decoder.decode(&capture.output) {
            let mut event = match item {
                Ok(event) => event,
                Err(err) => {
                    error!(
                        command = %self.command,
                        error = %err,
                        "error while decoding command output"
                    );
                    continue;
                }
            };

            event.set_if_absent(&self.fields.host_name, json!(self.hostname));
            event.set_if_absent(&self.fields.command_line, json!(self.command));
            if let Some(code) = capture.exit_code {
                event.set_if_absent(&self.fields.exit_code, json!(code));
            }
            if let Some(path) = &self.fields.elapsed_time_nanos {
                event.set(path, json!(elapsed_nanos));
            }
            if let Some(path) = &self.fields.legacy_duration_secs {
                event.set(path, json!(elapsed_secs));
            }

            self.sink.push(event).await;
        }
    }
}

/// Hostname used to annotate events, captured once at startup.
pub fn system_hostname() -> String {
    std::fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("HOSTNAME").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
