// src/lib.rs

pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod event;
pub mod exec;
pub mod logging;
pub mod sched;
pub mod sink;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::{ConfigFile, RunMode};
use crate::event::Event;
use crate::sched::Driver;
use crate::sink::ChannelSink;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the scheduling driver and process executor
/// - the stdout event printer
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // Event channel: the executor pushes, the printer below consumes.
    let (event_tx, event_rx) = mpsc::channel::<Event>(64);

    let decoder = codec::for_kind(cfg.codec);
    let sink = Box::new(ChannelSink::new(event_tx));
    let driver = Driver::new(&cfg, decoder, sink);

    let printer = tokio::spawn(print_events(event_rx));

    if args.once {
        let duration = driver.execute_once().await;
        debug!(
            duration_secs = duration.as_secs_f64(),
            "single execution complete"
        );
    } else {
        // Ctrl-C → graceful shutdown.
        let stop = driver.stop_handle();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            stop.stop().await;
        });

        driver.run().await?;
    }

    // Dropping the driver closes the event channel; the printer drains
    // whatever is still queued and exits.
    drop(driver);
    let _ = printer.await;

    Ok(())
}

/// Print each event as one JSON line on stdout.
async fn print_events(mut rx: mpsc::Receiver<Event>) {
    while let Some(event) = rx.recv().await {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => debug!(error = %e, "failed to serialize event"),
        }
    }
}

/// Simple dry-run output: print what would run, and when.
fn print_dry_run(cfg: &ConfigFile) {
    println!("tickrun dry-run");
    println!("  command: {}", cfg.command);
    match &cfg.mode {
        RunMode::Interval(d) => println!("  interval: {}s", d.as_secs_f64()),
        RunMode::Schedule { expression, .. } => println!("  schedule: {expression}"),
    }
    println!("  codec: {:?}", cfg.codec);
    println!("  ecs_compatibility: {:?}", cfg.ecs_compatibility);

    debug!("dry-run complete (no execution)");
}
