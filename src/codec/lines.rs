// src/codec/lines.rs

use super::{DecodedEvents, Decoder};
use crate::event::Event;

/// One event per non-empty output line. Trailing `\r` is stripped so CRLF
/// output decodes the same as LF output. An empty capture yields no events.
pub struct LinesDecoder;

impl Decoder for LinesDecoder {
    fn decode<'a>(&'a self, bytes: &'a [u8]) -> DecodedEvents<'a> {
        Box::new(
            bytes
                .split(|b| *b == b'\n')
                .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
                .filter(|line| !line.is_empty())
                .map(|line| Ok(Event::with_message(String::from_utf8_lossy(line).into_owned()))),
        )
    }
}
