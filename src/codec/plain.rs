// src/codec/plain.rs

use super::{DecodedEvents, Decoder};
use crate::event::Event;

/// Default decoder: the entire captured output becomes a single event's
/// `message`, invalid UTF-8 replaced. An empty capture still yields one
/// event with an empty message.
pub struct PlainDecoder;

impl Decoder for PlainDecoder {
    fn decode<'a>(&'a self, bytes: &'a [u8]) -> DecodedEvents<'a> {
        let message = String::from_utf8_lossy(bytes).into_owned();
        Box::new(std::iter::once(Ok(Event::with_message(message))))
    }
}
