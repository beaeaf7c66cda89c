use std::io::Write;
use std::time::Duration;

use tickrun::config::{ConfigFile, RunMode, load_and_validate};
use tickrun::errors::TickrunError;
use tickrun::types::{CodecKind, EcsCompatibility};
use tickrun_test_utils::builders::InputConfigBuilder;

fn validate(builder: InputConfigBuilder) -> Result<ConfigFile, TickrunError> {
    ConfigFile::try_from(builder.build_raw())
}

fn expect_config_error(builder: InputConfigBuilder) -> String {
    match validate(builder) {
        Err(TickrunError::ConfigError(msg)) => msg,
        Err(other) => panic!("expected ConfigError, got {other:?}"),
        Ok(cfg) => panic!("expected ConfigError, got valid config {cfg:?}"),
    }
}

#[test]
fn interval_only_is_valid() {
    let cfg = validate(InputConfigBuilder::new("uptime").interval(5.0)).unwrap();
    assert_eq!(cfg.command, "uptime");
    match cfg.mode {
        RunMode::Interval(d) => assert_eq!(d, Duration::from_secs(5)),
        other => panic!("expected interval mode, got {other:?}"),
    }
}

#[test]
fn fractional_interval_is_valid() {
    let cfg = validate(InputConfigBuilder::new("uptime").interval(0.5)).unwrap();
    match cfg.mode {
        RunMode::Interval(d) => assert_eq!(d, Duration::from_millis(500)),
        other => panic!("expected interval mode, got {other:?}"),
    }
}

#[test]
fn schedule_only_is_valid() {
    let cfg = validate(InputConfigBuilder::new("uptime").schedule("*/5 * * * * *")).unwrap();
    match cfg.mode {
        RunMode::Schedule { expression, .. } => assert_eq!(expression, "*/5 * * * * *"),
        other => panic!("expected schedule mode, got {other:?}"),
    }
}

#[test]
fn five_field_schedule_is_normalized() {
    let cfg = validate(InputConfigBuilder::new("uptime").schedule("*/5 * * * *")).unwrap();
    match cfg.mode {
        RunMode::Schedule { expression, .. } => assert_eq!(expression, "0 */5 * * * *"),
        other => panic!("expected schedule mode, got {other:?}"),
    }
}

#[test]
fn both_interval_and_schedule_fail() {
    let msg = expect_config_error(
        InputConfigBuilder::new("uptime")
            .interval(5.0)
            .schedule("* * * * *"),
    );
    assert!(msg.contains("exactly one"), "unexpected message: {msg}");
}

#[test]
fn neither_interval_nor_schedule_fails() {
    let msg = expect_config_error(InputConfigBuilder::new("uptime"));
    assert!(msg.contains("exactly one"), "unexpected message: {msg}");
}

#[test]
fn empty_command_fails() {
    expect_config_error(InputConfigBuilder::new("").interval(5.0));
}

#[test]
fn whitespace_command_fails() {
    expect_config_error(InputConfigBuilder::new("   ").interval(5.0));
}

#[test]
fn command_is_trimmed() {
    let cfg = validate(InputConfigBuilder::new("  uptime  ").interval(5.0)).unwrap();
    assert_eq!(cfg.command, "uptime");
}

#[test]
fn zero_interval_fails() {
    expect_config_error(InputConfigBuilder::new("uptime").interval(0.0));
}

#[test]
fn negative_interval_fails() {
    expect_config_error(InputConfigBuilder::new("uptime").interval(-1.0));
}

#[test]
fn malformed_cron_fails() {
    let msg = expect_config_error(InputConfigBuilder::new("uptime").schedule("not a cron expr"));
    assert!(msg.contains("cron"), "unexpected message: {msg}");
}

#[test]
fn load_and_validate_reads_toml_with_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[input]
command = "uptime"
interval = 10
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.command, "uptime");
    assert_eq!(cfg.codec, CodecKind::Plain);
    assert_eq!(cfg.ecs_compatibility, EcsCompatibility::Disabled);
    match cfg.mode {
        RunMode::Interval(d) => assert_eq!(d, Duration::from_secs(10)),
        other => panic!("expected interval mode, got {other:?}"),
    }
}

#[test]
fn load_and_validate_reads_explicit_codec_and_ecs() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[input]
command = "uptime"
schedule = "* * * * *"
codec = "lines"
ecs_compatibility = "v1"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.codec, CodecKind::Lines);
    assert_eq!(cfg.ecs_compatibility, EcsCompatibility::V1);
}

#[test]
fn missing_input_section_is_a_toml_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[something_else]\nx = 1").unwrap();

    match load_and_validate(file.path()) {
        Err(TickrunError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    match load_and_validate("/definitely/not/here/Tickrun.toml") {
        Err(TickrunError::IoError(_)) => {}
        other => panic!("expected IoError, got {other:?}"),
    }
}
