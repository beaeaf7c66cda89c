#![allow(dead_code)]

use tickrun::config::{ConfigFile, RawConfigFile, RawInputSection};
use tickrun::types::{CodecKind, EcsCompatibility};

/// Builder for `ConfigFile` to simplify test setup.
pub struct InputConfigBuilder {
    input: RawInputSection,
}

impl InputConfigBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            input: RawInputSection {
                command: command.to_string(),
                interval: None,
                schedule: None,
                codec: CodecKind::default(),
                ecs_compatibility: EcsCompatibility::default(),
            },
        }
    }

    pub fn interval(mut self, secs: f64) -> Self {
        self.input.interval = Some(secs);
        self
    }

    pub fn schedule(mut self, expr: &str) -> Self {
        self.input.schedule = Some(expr.to_string());
        self
    }

    pub fn codec(mut self, codec: CodecKind) -> Self {
        self.input.codec = codec;
        self
    }

    pub fn ecs_compatibility(mut self, mode: EcsCompatibility) -> Self {
        self.input.ecs_compatibility = mode;
        self
    }

    /// The raw (unvalidated) config, for tests exercising validation.
    pub fn build_raw(self) -> RawConfigFile {
        RawConfigFile { input: self.input }
    }

    /// A validated config; panics if the builder combination is invalid.
    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.build_raw()).expect("Failed to build valid config from builder")
    }
}
