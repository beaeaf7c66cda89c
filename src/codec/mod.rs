// src/codec/mod.rs

//! Output decoding layer.
//!
//! Decoders turn the raw bytes captured from a command into zero or more
//! [`Event`]s, lazily. The executor hands every capture (even an empty one)
//! to the configured decoder and treats per-item [`DecodeError`]s as
//! recoverable: the item is logged and skipped, the tick continues.
//!
//! - [`plain`] — the whole output becomes one event's `message`.
//! - [`lines`] — one event per non-empty line.
//! - [`json`] — the output is parsed as a JSON object, array or scalar.

pub mod json;
pub mod lines;
pub mod plain;

pub use json::JsonDecoder;
pub use lines::LinesDecoder;
pub use plain::PlainDecoder;

use thiserror::Error;

use crate::event::Event;
use crate::types::CodecKind;

/// Failure while decoding captured output into events.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON in command output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Lazy stream of decoded events.
pub type DecodedEvents<'a> = Box<dyn Iterator<Item = Result<Event, DecodeError>> + Send + 'a>;

/// Trait abstracting how captured bytes become events.
///
/// Production code selects an implementation from the configured
/// [`CodecKind`] via [`for_kind`]; tests can provide their own.
pub trait Decoder: Send + Sync {
    fn decode<'a>(&'a self, bytes: &'a [u8]) -> DecodedEvents<'a>;
}

/// Decoder for a configured codec kind.
pub fn for_kind(kind: CodecKind) -> Box<dyn Decoder> {
    match kind {
        CodecKind::Plain => Box::new(PlainDecoder),
        CodecKind::Lines => Box::new(LinesDecoder),
        CodecKind::Json => Box::new(JsonDecoder),
    }
}
