use std::time::{Duration, Instant};

use tickrun::codec;
use tickrun::config::ConfigFile;
use tickrun::sched::Driver;
use tickrun_test_utils::builders::InputConfigBuilder;
use tickrun_test_utils::sinks::CollectingSink;
use tickrun_test_utils::{init_tracing, with_timeout};

fn driver_for(cfg: &ConfigFile, sink: &CollectingSink) -> Driver {
    Driver::new(cfg, codec::for_kind(cfg.codec), Box::new(sink.clone()))
}

#[tokio::test]
async fn fires_about_once_per_second() {
    init_tracing();

    let cfg = InputConfigBuilder::new("printf tick")
        .schedule("* * * * * *")
        .build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    let handle = tokio::spawn(async move { driver.run().await });

    // ~2.5s window: depending on where in the second we start, 2 or 3
    // fires land inside it.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    with_timeout(stop.stop()).await;
    with_timeout(handle).await.unwrap().unwrap();

    let count = sink.len();
    assert!((1..=4).contains(&count), "expected 1..=4 fires, got {count}");
}

#[tokio::test]
async fn stop_halts_further_fires() {
    init_tracing();

    let cfg = InputConfigBuilder::new("printf tick")
        .schedule("* * * * * *")
        .build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    let handle = tokio::spawn(async move { driver.run().await });

    with_timeout(sink.wait_for_events(1)).await;
    with_timeout(stop.stop()).await;
    with_timeout(handle).await.unwrap().unwrap();

    let count_at_stop = sink.len();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(sink.len(), count_at_stop, "no fires after stop");
}

#[tokio::test]
async fn stop_mid_wait_returns_quickly() {
    init_tracing();

    // Hourly schedule: the worker spends essentially all its time waiting
    // for the next fire; stop must not wait that out.
    let cfg = InputConfigBuilder::new("printf tick")
        .schedule("0 0 * * * *")
        .build();
    let sink = CollectingSink::new();
    let driver = driver_for(&cfg, &sink);
    let stop = driver.stop_handle();

    let handle = tokio::spawn(async move { driver.run().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let before = Instant::now();
    with_timeout(stop.stop()).await;
    with_timeout(handle).await.unwrap().unwrap();

    assert!(
        before.elapsed() < Duration::from_secs(5),
        "stop should interrupt the cron wait, took {:?}",
        before.elapsed()
    );
}
