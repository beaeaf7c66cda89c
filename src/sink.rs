// src/sink.rs

//! Event sinks.
//!
//! The executor talks to an [`EventSink`] instead of a raw channel sender,
//! so tests can swap in a collecting sink while production wires events
//! into the output stage through [`ChannelSink`].

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tracing::debug;

use crate::event::Event;

/// Trait abstracting where finished events go.
///
/// Pushing is fire-and-forget: implementations swallow delivery failures
/// rather than surfacing them to the executor.
pub trait EventSink: Send + Sync {
    fn push(&self, event: Event) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Production sink: forwards events into a bounded mpsc channel consumed
/// by the process's output stage.
pub struct ChannelSink {
    tx: mpsc::Sender<Event>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn push(&self, event: Event) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            if self.tx.send(event).await.is_err() {
                debug!("event channel closed; dropping event");
            }
        })
    }
}
