// src/sched/driver.rs

//! The run loop around the executor, in two modes.
//!
//! Interval mode executes a tick, then sleeps for whatever is left of the
//! interval; the sleep wakes early on stop. Schedule mode spins up exactly
//! one worker task that fires the executor at cron instants, strictly
//! serialized; a fire instant that passes while a run is still executing is
//! skipped, not queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use cron::Schedule;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::codec::Decoder;
use crate::config::{ConfigFile, RunMode};
use crate::errors::{Result, TickrunError};
use crate::event::AnnotationFields;
use crate::exec::{ProcessRunner, RunExecutor, system_hostname};
use crate::sink::EventSink;

use super::cron::{delay_until, next_fire};

/// State shared between the driver and its stop handles.
struct Shared {
    stop: watch::Sender<bool>,
    done: watch::Sender<bool>,
    started: AtomicBool,
}

/// Drives the executor according to the configured run mode.
pub struct Driver {
    executor: Arc<RunExecutor>,
    runner: Arc<ProcessRunner>,
    mode: RunMode,
    shared: Arc<Shared>,
}

impl Driver {
    /// Build a driver from a validated config plus its collaborators.
    ///
    /// Annotation field paths and the hostname are resolved here, before
    /// any run starts.
    pub fn new(cfg: &ConfigFile, decoder: Box<dyn Decoder>, sink: Box<dyn EventSink>) -> Self {
        let runner = Arc::new(ProcessRunner::new());
        Self::with_runner(cfg, decoder, sink, runner)
    }

    /// Same as [`new`](Self::new), with an explicit process runner. Tests
    /// use this to inject an unspawnable shell.
    pub fn with_runner(
        cfg: &ConfigFile,
        decoder: Box<dyn Decoder>,
        sink: Box<dyn EventSink>,
        runner: Arc<ProcessRunner>,
    ) -> Self {
        let (stop, _) = watch::channel(false);
        let (done, _) = watch::channel(false);

        let executor = Arc::new(RunExecutor::new(
            cfg.command.clone(),
            system_hostname(),
            AnnotationFields::resolve(cfg.ecs_compatibility),
            decoder,
            sink,
            Arc::clone(&runner),
        ));

        Self {
            executor,
            runner,
            mode: cfg.mode.clone(),
            shared: Arc::new(Shared {
                stop,
                done,
                started: AtomicBool::new(false),
            }),
        }
    }

    /// Handle for requesting a stop; usable from any task, any number of
    /// times, before, during or after [`run`](Self::run).
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            shared: Arc::clone(&self.shared),
            runner: Arc::clone(&self.runner),
        }
    }

    /// Run a single tick. Used by `--once` and tests.
    pub async fn execute_once(&self) -> Duration {
        self.executor.execute().await
    }

    /// Run until stopped.
    pub async fn run(&self) -> Result<()> {
        self.shared.started.store(true, Ordering::SeqCst);
        info!(
            command = %self.executor.command(),
            mode = ?self.mode,
            "driver started"
        );

        let result = match self.mode.clone() {
            RunMode::Interval(interval) => self.run_interval(interval).await,
            RunMode::Schedule {
                expression,
                schedule,
            } => self.run_schedule(expression, schedule).await,
        };

        // send_replace updates the value even when no receiver is
        // subscribed yet; a later stop() must still observe it.
        self.shared.done.send_replace(true);
        info!("driver exiting");
        result
    }

    async fn run_interval(&self, interval: Duration) -> Result<()> {
        let mut stop_rx = self.shared.stop.subscribe();

        while !*stop_rx.borrow_and_update() {
            let elapsed = self.executor.execute().await;
            self.wait_until_end_of_interval(interval, elapsed, &mut stop_rx)
                .await;
        }

        Ok(())
    }

    /// Sleep for the remainder of the interval, or not at all if the run
    /// overran its slot. The sleep wakes early when a stop is requested.
    async fn wait_until_end_of_interval(
        &self,
        interval: Duration,
        elapsed: Duration,
        stop_rx: &mut watch::Receiver<bool>,
    ) {
        if elapsed >= interval {
            warn!(
                command = %self.executor.command(),
                duration_secs = elapsed.as_secs_f64(),
                interval_secs = interval.as_secs_f64(),
                "execution ran longer than the interval; skipping sleep"
            );
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval - elapsed) => {}
            _ = stop_rx.wait_for(|stopped| *stopped) => {}
        }
    }

    async fn run_schedule(&self, expression: String, schedule: Schedule) -> Result<()> {
        let executor = Arc::clone(&self.executor);
        let mut stop_rx = self.shared.stop.subscribe();

        // All fires land on this one worker and execute inline, so runs
        // never overlap.
        let worker = tokio::spawn(async move {
            info!(schedule = %expression, "cron worker started");

            while !*stop_rx.borrow_and_update() {
                let now = Utc::now();
                let Some(next) = next_fire(&schedule, now) else {
                    warn!(
                        schedule = %expression,
                        "cron expression has no future fire times; stopping worker"
                    );
                    break;
                };
                debug!(schedule = %expression, next = %next, "waiting for next fire");

                tokio::select! {
                    _ = tokio::time::sleep(delay_until(next, now)) => {
                        executor.execute().await;
                    }
                    _ = stop_rx.changed() => break,
                }
            }

            info!("cron worker finished");
        });

        worker
            .await
            .map_err(|e| TickrunError::Other(anyhow::Error::new(e)))
    }
}

/// Requests the driver to stop.
///
/// Cloneable and usable from any task or thread; the driver itself stays
/// owned by whoever calls [`Driver::run`].
#[derive(Clone)]
pub struct StopHandle {
    shared: Arc<Shared>,
    runner: Arc<ProcessRunner>,
}

impl StopHandle {
    /// Idempotent stop: raises the stop flag, force-closes any outstanding
    /// process handle (unblocking an in-flight read), and waits for a
    /// started driver to finish its current tick and return. A stop before
    /// [`Driver::run`] only raises the flag; a stop after termination
    /// returns immediately.
    pub async fn stop(&self) {
        if self.shared.stop.send_replace(true) {
            debug!("stop already requested");
        } else {
            info!("stop requested");
        }

        self.runner.release();

        if self.shared.started.load(Ordering::SeqCst) {
            let mut done_rx = self.shared.done.subscribe();
            let _ = done_rx.wait_for(|done| *done).await;
        }
    }
}
