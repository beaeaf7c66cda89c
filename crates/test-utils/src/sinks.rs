use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use tickrun::event::Event;
use tickrun::sink::EventSink;

/// A sink that records every pushed event, for assertions.
///
/// Clones share the same underlying store, so a test can hand one clone to
/// the driver and keep another for inspection.
#[derive(Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<Event>>>,
    notify: Arc<Notify>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` events have been pushed.
    ///
    /// Combine with `with_timeout` so a broken driver fails the test
    /// instead of hanging it.
    pub async fn wait_for_events(&self, count: usize) {
        loop {
            if self.len() >= count {
                return;
            }
            self.notify.notified().await;
        }
    }
}

impl EventSink for CollectingSink {
    fn push(&self, event: Event) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.events.lock().unwrap().push(event);
            self.notify.notify_one();
        })
    }
}
