use std::time::{Duration, Instant};

use tickrun::codec;
use tickrun::config::ConfigFile;
use tickrun::event::FieldPath;
use tickrun::sched::Driver;
use tickrun::types::EcsCompatibility;
use tickrun_test_utils::builders::InputConfigBuilder;
use tickrun_test_utils::sinks::CollectingSink;
use tickrun_test_utils::{init_tracing, with_timeout};

fn driver_for(cfg: &ConfigFile, sink: &CollectingSink) -> Driver {
    Driver::new(cfg, codec::for_kind(cfg.codec), Box::new(sink.clone()))
}

#[tokio::test]
async fn stop_before_run_is_a_noop() {
    init_tracing();

    let cfg = InputConfigBuilder::new("printf tick").interval(60.0).build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    with_timeout(stop.stop()).await;
    with_timeout(stop.stop()).await;

    assert!(sink.is_empty());
}

#[tokio::test]
async fn stop_twice_after_run_never_panics() {
    init_tracing();

    let cfg = InputConfigBuilder::new("printf tick").interval(60.0).build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    let handle = tokio::spawn(async move { driver.run().await });
    with_timeout(sink.wait_for_events(1)).await;

    with_timeout(stop.stop()).await;
    with_timeout(stop.stop()).await;
    with_timeout(handle).await.unwrap().unwrap();

    // A third stop after normal termination returns immediately.
    with_timeout(stop.stop()).await;
}

#[tokio::test]
async fn stop_unblocks_an_in_flight_read() {
    init_tracing();

    // The command would run for 30s; stop force-closes the process handle,
    // which unblocks the output read and lets the loop observe the flag.
    let cfg = InputConfigBuilder::new("sleep 30")
        .interval(60.0)
        .ecs_compatibility(EcsCompatibility::V1)
        .build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    let handle = tokio::spawn(async move { driver.run().await });

    // Give the command time to spawn and enter the read.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let before = Instant::now();
    with_timeout(stop.stop()).await;
    with_timeout(handle).await.unwrap().unwrap();

    assert!(
        before.elapsed() < Duration::from_secs(5),
        "stop should unblock the read, took {:?}",
        before.elapsed()
    );

    // The force-closed tick decodes whatever bytes arrived (none here) and
    // carries no exit code.
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message(), Some(""));
    assert!(!events[0].contains(&FieldPath::from_segments(["process", "exit_code"])));
}

#[tokio::test]
async fn stop_after_execute_once_returns_immediately() {
    init_tracing();

    let cfg = InputConfigBuilder::new("printf tick").interval(60.0).build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    with_timeout(driver.execute_once()).await;
    with_timeout(stop.stop()).await;

    assert_eq!(sink.len(), 1);
}
