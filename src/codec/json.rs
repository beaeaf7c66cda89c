// src/codec/json.rs

use serde_json::{Map, Value};

use super::{DecodeError, DecodedEvents, Decoder};
use crate::event::Event;

/// Parse the whole output as JSON.
///
/// - An object becomes one event carrying its fields.
/// - An array becomes one event per element.
/// - Any other value becomes an event with the value under `message`.
/// - Blank output yields no events; unparseable output yields a single
///   `DecodeError` item.
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode<'a>(&'a self, bytes: &'a [u8]) -> DecodedEvents<'a> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Box::new(std::iter::empty());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Array(items)) => Box::new(items.into_iter().map(|v| Ok(value_to_event(v)))),
            Ok(value) => Box::new(std::iter::once(Ok(value_to_event(value)))),
            Err(e) => Box::new(std::iter::once(Err(DecodeError::from(e)))),
        }
    }
}

fn value_to_event(value: Value) -> Event {
    match value {
        Value::Object(fields) => Event::from_object(fields),
        other => {
            let mut fields = Map::new();
            fields.insert("message".to_string(), other);
            Event::from_object(fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::FieldPath;
    use serde_json::json;

    #[test]
    fn object_becomes_one_event() {
        let events: Vec<_> = JsonDecoder.decode(br#"{"load": 0.5, "host": "a"}"#).collect();
        assert_eq!(events.len(), 1);
        let event = events.into_iter().next().unwrap().unwrap();
        assert_eq!(
            event.get(&FieldPath::from_segments(["load"])),
            Some(&json!(0.5))
        );
    }

    #[test]
    fn array_becomes_one_event_per_element() {
        let events: Vec<_> = JsonDecoder.decode(br#"[{"n": 1}, {"n": 2}]"#).collect();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn scalar_goes_under_message() {
        let events: Vec<_> = JsonDecoder.decode(b"42").collect();
        let event = events.into_iter().next().unwrap().unwrap();
        assert_eq!(
            event.get(&FieldPath::from_segments(["message"])),
            Some(&json!(42))
        );
    }

    #[test]
    fn blank_output_yields_no_events() {
        assert_eq!(JsonDecoder.decode(b"  \n").count(), 0);
    }

    #[test]
    fn parse_failure_yields_one_error_item() {
        let items: Vec<_> = JsonDecoder.decode(b"{not json").collect();
        assert_eq!(items.len(), 1);
        assert!(items.into_iter().next().unwrap().is_err());
    }
}
