//! Hand-off boundary to the transport layer.

use std::sync::Mutex;

use viewtrack_core::Event;

use crate::error::SinkError;

/// Receiver of prepared events, such as a send queue.
pub trait EventSink: Send + Sync {
    /// Takes ownership of a prepared event.
    fn accept(&self, event: Event) -> Result<(), SinkError>;
}

/// Sink that keeps events in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Event>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all collected events.
    pub fn drain(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for MemorySink {
    fn accept(&self, event: Event) -> Result<(), SinkError> {
        self.events
            .lock()
            .map_err(|_| SinkError("memory sink lock poisoned".into()))?
            .push(event);
        Ok(())
    }
}
