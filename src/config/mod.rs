// src/config/mod.rs

//! Configuration loading, modelling and validation.
//!
//! The raw TOML shape lives in [`model`]; [`loader`] reads it from disk and
//! [`validate`] turns a `RawConfigFile` into a checked [`ConfigFile`] with a
//! typed run mode. All configuration errors are fatal and reported before
//! any command is executed.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, RawConfigFile, RawInputSection, RunMode};
