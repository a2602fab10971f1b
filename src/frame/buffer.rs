//! Ordered buffer of normalized events pending delivery.

use crate::input::NormalizedEvent;

/// Append-only sequence collected between two refresh ticks.
#[derive(Debug, Default)]
pub struct FrameEventBuffer {
    events: Vec<NormalizedEvent>,
}

impl FrameEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: NormalizedEvent) {
        self.events.push(event);
    }

    /// Take everything appended so far, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<NormalizedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn pending(&self) -> &[NormalizedEvent] {
        &self.events
    }
}
