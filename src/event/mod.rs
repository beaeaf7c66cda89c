// src/event/mod.rs

//! Structured events and field addressing.
//!
//! An [`Event`] is a nested JSON object. Fields are addressed by
//! [`FieldPath`], an ordered list of segments, so annotations can target
//! nested locations like `[process][exit_code]` as well as flat ones like
//! `command`. Which paths the annotations use is decided once at setup by
//! [`fields::AnnotationFields`].

pub mod fields;

pub use fields::AnnotationFields;

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Path to a field inside an event, e.g. `[host][name]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Build a path from its segments. Empty segment lists are not
    /// meaningful; callers construct paths from literals.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.len() == 1 {
            return write!(f, "{}", self.segments[0]);
        }
        for segment in &self.segments {
            write!(f, "[{segment}]")?;
        }
        Ok(())
    }
}

/// One structured event produced from decoded command output.
///
/// Decoders create events carrying the message content; the executor then
/// annotates them with execution metadata before they reach the sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event with just a `message` field.
    pub fn with_message(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("message".to_string(), Value::String(message.into()));
        Self { fields }
    }

    /// Event built from an already-structured JSON object (json codec).
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a (possibly nested) field.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut segments = path.segments().iter();
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get(path).is_some()
    }

    /// Set a (possibly nested) field, creating intermediate objects as
    /// needed. A non-object value sitting where an intermediate object is
    /// expected gets replaced.
    pub fn set(&mut self, path: &FieldPath, value: Value) {
        let segments = path.segments();
        let Some((last, intermediate)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.fields;
        for segment in intermediate {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = match slot.as_object_mut() {
                Some(map) => map,
                None => return,
            };
        }
        current.insert(last.clone(), value);
    }

    /// Set a field only when nothing is there yet (non-destructive
    /// enrichment).
    pub fn set_if_absent(&mut self, path: &FieldPath, value: Value) {
        if !self.contains(path) {
            self.set(path, value);
        }
    }

    /// Convenience accessor for the top-level `message` field.
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").and_then(Value::as_str)
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
